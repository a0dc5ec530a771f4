pub mod email_sender;
pub mod user_email_notifier;
