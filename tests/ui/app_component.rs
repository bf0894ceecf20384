use crate::common::*;
use novabites::api::ApiError;
use novabites::logger::Logger;
use novabites::notify::ValidationError;
use novabites::session::Session;
use novabites::ui::core::{Action, Component, Screen, UiContext};
use novabites::ui::AppComponent;
use std::sync::Arc;
use std::time::Duration;

fn app(backend: Arc<FakeBackend>, session: Session) -> AppComponent {
    AppComponent::new(backend, session, UiContext::default(), Logger::new())
}

async fn wait_for_actions(app: &mut AppComponent) -> Vec<Action> {
    for _ in 0..100 {
        let actions = app.process_background_actions();
        if !actions.is_empty() {
            return actions;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    Vec::new()
}

#[tokio::test]
async fn test_sign_in_and_logout() {
    let backend = Arc::new(FakeBackend::new());
    let mut app = app(backend.clone(), Session::new(None));
    assert!(!app.is_signed_in());
    assert_eq!(app.active_screen(), Screen::Dashboard);

    let token = valid_token();
    let next = app.handle_app_action(Action::SignedIn(token.clone()));
    assert!(next.is_none());
    assert!(app.is_signed_in());
    assert_eq!(*backend.token.lock().unwrap(), Some(token));

    app.handle_app_action(Action::Logout);
    assert!(!app.is_signed_in());
    assert_eq!(*backend.token.lock().unwrap(), None);
}

#[tokio::test]
async fn test_rejected_token_keeps_sign_in() {
    let backend = Arc::new(FakeBackend::new());
    let mut app = app(backend.clone(), Session::new(None));

    app.handle_app_action(Action::SignedIn("basura".to_string()));
    assert!(!app.is_signed_in());
    assert_eq!(*backend.token.lock().unwrap(), None);
}

#[tokio::test]
async fn test_restored_session_skips_sign_in() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token");
    let token = valid_token();
    std::fs::write(&path, &token).unwrap();

    let mut session = Session::new(Some(path));
    assert!(session.restore().is_some());

    let backend = Arc::new(FakeBackend::new());
    let app = app(backend.clone(), session);
    assert!(app.is_signed_in());
    assert_eq!(*backend.token.lock().unwrap(), Some(token));
}

#[tokio::test]
async fn test_expired_failure_logs_out() {
    let backend = Arc::new(FakeBackend::new());
    let mut app = app(backend, Session::new(None));
    app.handle_app_action(Action::SignedIn(valid_token()));

    // Ordinary failures only toast
    app.handle_app_action(Action::Failed(ValidationError::new("Error", "algo")));
    assert!(app.is_signed_in());

    app.handle_app_action(Action::Failed(ValidationError::api("Error", &ApiError::Unauthorized)));
    assert!(!app.is_signed_in());
}

#[tokio::test]
async fn test_navigation_loads_screen() {
    let backend = Arc::new(FakeBackend::new());
    let mut app = app(backend.clone(), Session::new(None));
    app.handle_app_action(Action::SignedIn(valid_token()));

    let action = app.update(Action::Navigate(Screen::Profile));
    app.handle_app_action(action);
    assert_eq!(app.active_screen(), Screen::Profile);

    let actions = wait_for_actions(&mut app).await;
    assert!(matches!(actions.as_slice(), [Action::ProfileLoaded(user)] if user.id == "user-1"));
    assert_eq!(backend.calls(), vec!["get_user"]);

    app.update(Action::Back);
    assert_eq!(app.active_screen(), Screen::Dashboard);
}

#[tokio::test]
async fn test_navigation_denied_without_session() {
    let backend = Arc::new(FakeBackend::new());
    let mut app = app(backend.clone(), Session::new(None));

    let action = app.update(Action::Navigate(Screen::Sales));
    app.handle_app_action(action);
    assert_eq!(app.active_screen(), Screen::Dashboard);
    assert_eq!(app.active_task_count(), 0);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_screen_loads_need_a_user() {
    let backend = Arc::new(FakeBackend::new());
    let mut app = app(backend.clone(), Session::new(None));

    app.handle_app_action(Action::LoadScreen(Screen::Inventory));
    assert_eq!(app.active_task_count(), 0);
    assert!(!app.is_busy());
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_quit() {
    let mut app = app(Arc::new(FakeBackend::new()), Session::new(None));
    assert!(!app.should_quit());
    app.handle_app_action(Action::Quit);
    assert!(app.should_quit());
}
