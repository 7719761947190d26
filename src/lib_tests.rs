use super::*;

#[test]
fn exit_codes_are_distinct() {
    assert_ne!(EXIT_SUCCESS, EXIT_CHECKS_FAILED);
    assert_ne!(EXIT_SUCCESS, EXIT_CONFIG_ERROR);
    assert_ne!(EXIT_CHECKS_FAILED, EXIT_CONFIG_ERROR);
}

#[test]
fn interrupted_exit_code_follows_shell_convention() {
    assert_eq!(EXIT_INTERRUPTED, 128 + 2);
    assert!(![EXIT_SUCCESS, EXIT_CHECKS_FAILED, EXIT_CONFIG_ERROR].contains(&EXIT_INTERRUPTED));
}
