use novabites::notify::ValidationError;
use novabites::ui::core::{Action, Screen, TaskManager};
use std::time::Duration;

#[tokio::test]
async fn test_spawn_operation_sends_result_action() {
    let (mut manager, mut rx) = TaskManager::new();
    let id = manager.spawn_operation("Cargando perfil", async { Ok(Action::Navigate(Screen::Profile)) });
    assert_eq!(id, 1);
    assert_eq!(manager.task_count(), 1);

    let action = rx.recv().await.unwrap();
    assert!(matches!(action, Action::Navigate(Screen::Profile)));
}

#[tokio::test]
async fn test_failed_operation_becomes_failed_action() {
    let (mut manager, mut rx) = TaskManager::new();
    manager.spawn_operation("Creando orden", async {
        Err(ValidationError::new("Error al crear la orden", "Stock insuficiente"))
    });

    match rx.recv().await.unwrap() {
        Action::Failed(error) => {
            assert_eq!(error.title, "Error al crear la orden");
            assert!(!error.session_expired);
        }
        other => panic!("unexpected action: {:?}", other),
    }
}

#[tokio::test]
async fn test_cleanup_finished_tasks() {
    let (mut manager, mut rx) = TaskManager::new();
    manager.spawn_operation("Rápida", async { Ok(Action::None) });
    manager.spawn_operation("Lenta", async {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Action::None)
    });
    assert_eq!(manager.task_count(), 2);

    rx.recv().await.unwrap();
    // The send happens just before the task returns
    let mut cleaned = Vec::new();
    for _ in 0..50 {
        cleaned.extend(manager.cleanup_finished_tasks());
        if !cleaned.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(cleaned, vec![(1, "Rápida".to_string())]);
    assert_eq!(manager.task_count(), 1);
    assert_eq!(manager.current_description(), Some("Lenta"));

    manager.cancel_all_tasks();
    assert_eq!(manager.task_count(), 0);
    assert_eq!(manager.current_description(), None);
}
