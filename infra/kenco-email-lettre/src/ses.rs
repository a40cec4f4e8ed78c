//! Connection settings for the Amazon SES SMTP interface.
//!
//! SES accepts SMTP logins with the IAM access key id as username and a
//! password derived from the secret access key. Explicit SMTP credentials take
//! precedence when both are configured.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const DEFAULT_REGION: &str = "ap-southeast-2";

const SIGNING_DATE: &str = "11111111";
const SIGNING_SERVICE: &str = "ses";
const SIGNING_TERMINAL: &str = "aws4_request";
const SIGNING_MESSAGE: &str = "SendRawEmail";
const SIGNING_VERSION: u8 = 0x04;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SesSmtpConfig {
    pub host: String,
    pub region: String,
    pub credentials: Option<(String, String)>,
}

impl SesSmtpConfig {
    pub fn from_env() -> Self {
        let region = non_blank_env("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());
        let host = non_blank_env("SES_SMTP_HOST").unwrap_or_else(|| smtp_endpoint(&region));

        let credentials = match (
            non_blank_env("SES_SMTP_USERNAME"),
            non_blank_env("SES_SMTP_PASSWORD"),
        ) {
            (Some(username), Some(password)) => Some((username, password)),
            _ => match (
                non_blank_env("AWS_ACCESS_KEY_ID"),
                non_blank_env("AWS_SECRET_ACCESS_KEY"),
            ) {
                (Some(key_id), Some(secret)) => {
                    let password = derive_smtp_password(&secret, &region);
                    Some((key_id, password))
                }
                _ => None,
            },
        };

        Self {
            host,
            region,
            credentials,
        }
    }
}

pub fn smtp_endpoint(region: &str) -> String {
    format!("email-smtp.{}.amazonaws.com", region)
}

/// Converts an IAM secret access key into an SES SMTP password for `region`.
pub fn derive_smtp_password(secret_access_key: &str, region: &str) -> String {
    let mut signature = hmac_sha256(
        format!("AWS4{}", secret_access_key).as_bytes(),
        SIGNING_DATE.as_bytes(),
    );
    for part in [region, SIGNING_SERVICE, SIGNING_TERMINAL, SIGNING_MESSAGE] {
        signature = hmac_sha256(&signature, part.as_bytes());
    }

    let mut versioned = Vec::with_capacity(signature.len() + 1);
    versioned.push(SIGNING_VERSION);
    versioned.extend_from_slice(&signature);
    STANDARD.encode(versioned)
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smtp_endpoint() {
        assert_eq!(
            smtp_endpoint(DEFAULT_REGION),
            "email-smtp.ap-southeast-2.amazonaws.com"
        );
    }

    #[test]
    fn test_derived_password_shape() {
        let password = derive_smtp_password("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY", "us-east-1");
        // 33 bytes (version + sha256) encode to 44 characters; 0x04 leads with 'B'
        assert_eq!(password.len(), 44);
        assert!(password.starts_with('B'));
        assert_eq!(
            STANDARD.decode(&password).unwrap()[0],
            SIGNING_VERSION
        );
    }

    #[test]
    fn test_derived_password_depends_on_region_and_secret() {
        let secret = "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY";
        let sydney = derive_smtp_password(secret, "ap-southeast-2");
        assert_eq!(sydney, derive_smtp_password(secret, "ap-southeast-2"));
        assert_ne!(sydney, derive_smtp_password(secret, "us-east-1"));
        assert_ne!(sydney, derive_smtp_password("another-secret", "ap-southeast-2"));
    }
}
