pub mod sendgrid_mailer;
pub mod traits;
