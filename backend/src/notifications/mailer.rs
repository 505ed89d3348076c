//! Package confirmation emails.
//!
//! Delivery sits behind the `Mailer` trait. The shipped `LogMailer` only logs
//! the notice; a real transport plugs in at `main.rs`.

use super::NotifyError;
use common::model::package::PackageProfile;
use log::info;

/// Confirmation sent to the requester after a package is generated.
#[derive(Debug, Clone)]
pub struct PackageNotice {
    pub to: String,
    pub brand_name: String,
    pub profile: PackageProfile,
    pub filename: String,
    pub password: String,
    pub affiliate_code: String,
}

impl PackageNotice {
    pub fn subject(&self) -> String {
        format!("Your {} landing page package is ready", self.brand_name.trim())
    }

    pub fn body(&self) -> String {
        format!(
            "Your {} package `{}` for affiliate code {} has been generated.\n\nPackage password: {}\n\nKeep this password with your records.\n",
            self.profile.as_str(),
            self.filename,
            self.affiliate_code,
            self.password
        )
    }
}

/// Outbound email delivery. Called from the blocking pool.
pub trait Mailer: Send + Sync {
    fn send_package_notice(&self, notice: &PackageNotice) -> Result<(), NotifyError>;
}

/// Writes notices to the log instead of sending them. The password is left
/// out of the log line.
#[derive(Debug, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send_package_notice(&self, notice: &PackageNotice) -> Result<(), NotifyError> {
        info!(
            "Email to {}: \"{}\" ({} bytes, {})",
            notice.to,
            notice.subject(),
            notice.body().len(),
            notice.filename
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_body_carries_the_password() {
        let notice = PackageNotice {
            to: "a@b.com".to_string(),
            brand_name: " Acme ".to_string(),
            profile: PackageProfile::Standard,
            filename: "prelander_acme_aff1.zip".to_string(),
            password: "00112233445566778899AABB".to_string(),
            affiliate_code: "AFF1".to_string(),
        };
        assert_eq!(notice.subject(), "Your Acme landing page package is ready");
        assert!(notice.body().contains("Package password: 00112233445566778899AABB"));
        assert!(LogMailer.send_package_notice(&notice).is_ok());
    }
}
