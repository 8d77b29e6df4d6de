use serde::{Deserialize, Serialize};

/// Body of `POST /sendmail`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MailRequest {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl MailRequest {
    /// Addresses a relay can act on; blank fields count as missing
    pub fn has_recipient(&self) -> bool {
        !self.to.trim().is_empty()
    }

    pub fn has_sender(&self) -> bool {
        !self.from.trim().is_empty()
    }
}

/// 200 response of the relay
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelaySuccess {
    pub success: bool,
}

/// 401 response of the relay; `err` carries whatever the provider reported
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayFailure {
    pub err: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_failure_accepts_any_info() {
        let failure: RelayFailure = serde_json::from_str(r#"{"err":"bad key"}"#).unwrap();
        assert_eq!(failure.err, "bad key");

        let failure: RelayFailure =
            serde_json::from_str(r#"{"err":{"code":403,"message":"forbidden"}}"#).unwrap();
        assert_eq!(failure.err["code"], 403);
    }

    #[test]
    fn test_blank_recipient_is_missing() {
        let request = MailRequest {
            from: "desk@example.com".into(),
            to: "   ".into(),
            subject: "s".into(),
            text: "t".into(),
        };
        assert!(!request.has_recipient());
        assert!(request.has_sender());
    }
}
