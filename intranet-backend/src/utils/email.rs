// src/utils/email.rs

use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::env;
use thiserror::Error;
use tracing::info;

/// メール送信エラー
#[derive(Error, Debug)]
pub enum EmailError {
    #[error("SMTP configuration error: {0}")]
    ConfigurationError(String),

    #[error("Failed to send email: {0}")]
    SendError(String),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Missing email configuration")]
    MissingConfiguration,
}

/// メール設定
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: String,
    pub from_name: String,
    /// 開発モードかどうか（ログ出力のみ）
    pub development_mode: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            smtp_username: "user".to_string(),
            smtp_password: "password".to_string(),
            from_email: "noreply@example.com".to_string(),
            from_name: "Intranet".to_string(),
            development_mode: true,
        }
    }
}

impl EmailConfig {
    /// 環境変数から設定を読み込み
    pub fn from_env() -> Result<Self, EmailError> {
        let development_mode = env::var("EMAIL_DEVELOPMENT_MODE")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        // 開発モードの場合はデフォルト設定を返す
        if development_mode {
            return Ok(Self {
                development_mode: true,
                ..Default::default()
            });
        }

        let smtp_host = env::var("SMTP_HOST").map_err(|_| EmailError::MissingConfiguration)?;

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .map_err(|_| EmailError::ConfigurationError("Invalid SMTP port".to_string()))?;

        let smtp_username =
            env::var("SMTP_USERNAME").map_err(|_| EmailError::MissingConfiguration)?;

        let smtp_password =
            env::var("SMTP_PASSWORD").map_err(|_| EmailError::MissingConfiguration)?;

        let from_email = env::var("FROM_EMAIL").map_err(|_| EmailError::MissingConfiguration)?;

        let from_name = env::var("FROM_NAME").unwrap_or_else(|_| "Intranet".to_string());

        Ok(Self {
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            from_email,
            from_name,
            development_mode: false,
        })
    }
}

/// メール送信サービス
pub struct EmailService {
    config: EmailConfig,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let transport = if config.development_mode {
            None
        } else {
            let credentials = Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            );
            let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                .map_err(|e| EmailError::ConfigurationError(e.to_string()))?
                .port(config.smtp_port)
                .credentials(credentials)
                .build();
            Some(transport)
        };

        Ok(Self { config, transport })
    }

    pub fn from_env() -> Result<Self, EmailError> {
        let config = EmailConfig::from_env()?;
        Self::new(config)
    }

    /// メールを送信
    pub async fn send_email(
        &self,
        to_email: &str,
        to_name: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), EmailError> {
        if self.config.development_mode {
            // 開発モードではログ出力のみ
            info!(
                to_email = %to_email,
                subject = %subject,
                body = %body,
                "Development mode: email logged instead of sent"
            );
            return Ok(());
        }

        let from: Mailbox = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|_| EmailError::InvalidAddress(self.config.from_email.clone()))?;

        let to: Mailbox = format!("{} <{}>", to_name, to_email)
            .parse()
            .map_err(|_| EmailError::InvalidAddress(to_email.to_string()))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| EmailError::SendError(e.to_string()))?;

        let transport = self
            .transport
            .as_ref()
            .ok_or(EmailError::MissingConfiguration)?;

        transport
            .send(message)
            .await
            .map_err(|e| EmailError::SendError(e.to_string()))?;

        info!(to_email = %to_email, subject = %subject, "Email sent successfully");

        Ok(())
    }

    /// パスワードリセットの仮コードを送信
    pub async fn send_password_reset_email(
        &self,
        to_email: &str,
        to_name: &str,
        reset_code: &str,
    ) -> Result<(), EmailError> {
        let subject = "Password reset code";
        let body = format!(
            "Hello {},\n\n\
             A password reset was requested for your account.\n\
             Your temporary reset code is: {}\n\n\
             Enter this code together with your username and email to choose a new password.\n\
             If you did not request this, you can ignore this message.",
            to_name, reset_code
        );

        self.send_email(to_email, to_name, subject, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_development_mode_send_is_noop() {
        let service = EmailService::new(EmailConfig::default()).unwrap();
        service
            .send_password_reset_email("worker@example.com", "worker1", "AB12CD34")
            .await
            .unwrap();
    }
}
