//! Login challenge messages
//!
//! Challenges are not stored anywhere. The request id only correlates the
//! message with the request that produced it.

/// Build the message a wallet must sign to log in
pub fn build_challenge(wallet: &str, request_id: &str) -> String {
    format!(
        "Sign this message to login as {}. Request ID: {}",
        wallet, request_id
    )
}
