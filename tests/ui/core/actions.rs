use crate::common::{token_with, valid_token};
use novabites::session::Session;
use novabites::ui::core::Screen;
use serde_json::json;

#[test]
fn test_menu_needs_a_session() {
    assert!(Screen::menu_for(&Session::new(None)).is_empty());
}

#[test]
fn test_menu_for_signed_in_user() {
    let mut session = Session::new(None);
    session.login(&valid_token()).unwrap();
    assert_eq!(Screen::menu_for(&session), Screen::MENU.to_vec());

    let mut admin = Session::new(None);
    let exp = chrono::Utc::now().timestamp() + 3600;
    admin
        .login(&token_with(json!({
            "userId": "u-9", "name": "Ana", "username": "ana", "role": "ADMIN", "storeId": "store-1", "exp": exp
        })))
        .unwrap();
    assert_eq!(Screen::menu_for(&admin).len(), Screen::MENU.len());
}

#[test]
fn test_screen_labels() {
    assert_eq!(Screen::default(), Screen::Dashboard);
    assert_eq!(Screen::Closing.label(), "Cierre de caja");
    assert!(Screen::MENU.iter().all(|s| s.roles().is_empty()));
}
