use crate::common::user;
use crossterm::event::{KeyCode, KeyEvent};
use novabites::ui::components::MenuComponent;
use novabites::ui::core::{Action, Component, Screen};
use ratatui::layout::Rect;

fn press(menu: &mut MenuComponent, code: KeyCode) -> Action {
    menu.handle_key_events(KeyEvent::from(code))
}

#[test]
fn test_menu_is_empty_until_signed_in() {
    let mut menu = MenuComponent::new();
    assert!(matches!(press(&mut menu, KeyCode::Enter), Action::None));

    menu.set_user(Some(user()), Screen::MENU.to_vec());
    assert!(matches!(press(&mut menu, KeyCode::Enter), Action::Navigate(Screen::Sales)));
}

#[test]
fn test_menu_shows_only_given_entries() {
    let mut menu = MenuComponent::new();
    menu.set_user(Some(user()), vec![Screen::Sales, Screen::Profile]);
    press(&mut menu, KeyCode::Down);
    assert!(matches!(press(&mut menu, KeyCode::Enter), Action::Navigate(Screen::Profile)));

    // Signing out empties the menu whatever entries were passed
    menu.set_user(None, Screen::MENU.to_vec());
    assert!(matches!(press(&mut menu, KeyCode::Enter), Action::None));
}

#[test]
fn test_menu_selection_wraps() {
    let mut menu = MenuComponent::new();
    menu.set_user(Some(user()), Screen::MENU.to_vec());

    press(&mut menu, KeyCode::Up);
    assert!(matches!(press(&mut menu, KeyCode::Enter), Action::Navigate(Screen::Profile)));
    press(&mut menu, KeyCode::Char('j'));
    assert!(matches!(press(&mut menu, KeyCode::Char('l')), Action::Navigate(Screen::Sales)));
}

#[test]
fn test_navigation_moves_focus_to_screen() {
    let mut menu = MenuComponent::new();
    menu.set_user(Some(user()), Screen::MENU.to_vec());
    assert!(menu.is_focused());

    menu.update(Action::Navigate(Screen::Closing));
    assert_eq!(menu.active(), Screen::Closing);
    assert!(!menu.is_focused());
    // Keys belong to the screen now
    assert!(matches!(press(&mut menu, KeyCode::Enter), Action::None));

    menu.update(Action::Back);
    assert_eq!(menu.active(), Screen::Dashboard);
    assert!(menu.is_focused());
    // The cursor stayed on the last opened entry
    assert!(matches!(press(&mut menu, KeyCode::Enter), Action::Navigate(Screen::Closing)));
}

#[test]
fn test_click_selects_entry() {
    let mut menu = MenuComponent::new();
    menu.set_user(Some(user()), Screen::MENU.to_vec());
    let area = Rect::new(0, 0, 24, 20);

    assert!(matches!(menu.click(area, 2), Action::None));
    assert!(matches!(menu.click(area, 6), Action::Navigate(Screen::Orders)));
    assert!(matches!(menu.click(area, 19), Action::None));
}
