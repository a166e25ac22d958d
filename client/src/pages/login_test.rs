use super::*;

#[test]
fn validate_credentials_trims_email_and_requires_both_fields() {
    assert_eq!(
        validate_credentials("  donor@example.com ", "secret"),
        Ok(("donor@example.com".to_owned(), "secret".to_owned()))
    );
    assert_eq!(validate_credentials("   ", "secret"), Err("Enter both email and password."));
    assert_eq!(validate_credentials("donor@example.com", ""), Err("Enter both email and password."));
}

#[test]
fn validate_credentials_rejects_non_email() {
    assert_eq!(validate_credentials("donor", "secret"), Err("Enter a valid email address."));
}

#[test]
fn password_whitespace_is_preserved() {
    assert_eq!(validate_credentials("a@x.com", " pw "), Ok(("a@x.com".to_owned(), " pw ".to_owned())));
}
