//! Транзиентные уведомления с авто-скрытием.
//!
//! Таймер скрытия — отменяемая запланированная задача: показ нового
//! сообщения снимает предыдущий таймер и взводит новый.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Уровень уведомления.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

/// Текущее уведомление.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

/// Владелец транзиентного уведомления.
pub struct Notifier {
    current: Arc<Mutex<Option<Toast>>>,
    dismiss_after: Duration,
    timer: Option<JoinHandle<()>>,
}

impl Notifier {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
            dismiss_after,
            timer: None,
        }
    }

    /// Показать уведомление и перевзвести таймер скрытия.
    pub fn show(&mut self, level: ToastLevel, message: impl Into<String>) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        let toast = Toast {
            level,
            message: message.into(),
        };
        if let Ok(mut current) = self.current.lock() {
            *current = Some(toast);
        }

        let current = Arc::clone(&self.current);
        let dismiss_after = self.dismiss_after;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(dismiss_after).await;
            if let Ok(mut current) = current.lock() {
                *current = None;
            }
        }));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.show(ToastLevel::Info, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(ToastLevel::Error, message);
    }

    /// Текущее уведомление, если оно ещё не скрыто.
    pub fn current(&self) -> Option<Toast> {
        self.current.lock().ok().and_then(|toast| toast.clone())
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Дать задаче таймера зарегистрировать sleep (или сработать после advance).
    async fn settle() {
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_auto_dismisses() {
        let mut notifier = Notifier::new(Duration::from_secs(4));
        notifier.error("сбой сохранения");
        settle().await;
        assert!(notifier.current().is_some());

        tokio::time::advance(Duration::from_secs(5)).await;
        settle().await;

        assert!(notifier.current().is_none(), "уведомление скрылось по таймеру");
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_toast_rearms_timer() {
        let mut notifier = Notifier::new(Duration::from_secs(4));
        notifier.error("первое");
        settle().await;

        // За секунду до скрытия приходит новое сообщение
        tokio::time::advance(Duration::from_secs(3)).await;
        notifier.info("второе");
        settle().await;

        // Старый таймер снят: спустя ещё 3 секунды уведомление всё ещё видно
        tokio::time::advance(Duration::from_secs(3)).await;
        settle().await;
        let toast = notifier.current().expect("таймер перевзведён");
        assert_eq!(toast.message, "второе");

        tokio::time::advance(Duration::from_secs(2)).await;
        settle().await;
        assert!(notifier.current().is_none());
    }
}
