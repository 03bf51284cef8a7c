use rand::Rng;
use rand::distributions::Alphanumeric;

const CONFIRMATION_CODE_LEN: usize = 100;

/// Random alphanumeric code sent in the e-mail confirmation link.
pub fn generate_confirmation_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CONFIRMATION_CODE_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_confirmation_code() {
        let code = generate_confirmation_code();
        assert_eq!(code.len(), CONFIRMATION_CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(code, generate_confirmation_code());
    }
}
