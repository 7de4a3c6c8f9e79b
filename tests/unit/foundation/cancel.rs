use super::*;

#[test]
fn clones_share_cancellation() {
    let token = CancelToken::new();
    let held = token.clone();
    assert!(!held.is_cancelled());

    token.cancel();
    assert!(held.is_cancelled());
    assert!(held.same_as(&token));

    token.cancel();
    assert!(token.is_cancelled());
}

#[test]
fn independent_tokens_do_not_interfere() {
    let a = CancelToken::new();
    let b = CancelToken::new();
    a.cancel();
    assert!(!b.is_cancelled());
    assert!(!a.same_as(&b));
}
