//! Integration tests for the token lifecycle.

use local_token::{
    generate_token, read_token_file, RuntimeDirResolver, TokenAuthority, TokenError, TOKEN_LEN,
};
use secrecy::ExposeSecret;
use std::collections::HashSet;
use std::sync::Arc;
use test_utils::{FailingPathResolver, RecordingLogger, RuntimeDirFixture};

#[tokio::test]
async fn test_end_to_end_runtime_dir() {
    let fixture = RuntimeDirFixture::new().unwrap();
    let mut authority =
        TokenAuthority::new("myapp.token").with_path_resolver(fixture.env_resolver());

    let path = authority.init().await.unwrap();

    assert_eq!(path, fixture.token_path("myapp.token"));
    assert!(path.starts_with(fixture.root().join("run123")));
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(!content.is_empty());
    assert_eq!(content.len(), TOKEN_LEN);
    assert!(authority.check(&content));
    assert!(!authority.check(&format!("{content}x")));
}

#[tokio::test]
async fn test_client_reads_token_file() {
    let fixture = RuntimeDirFixture::new().unwrap();
    let mut authority =
        TokenAuthority::new("svc/auth.token").with_path_resolver(fixture.fixed_resolver());

    let path = authority.init().await.unwrap();
    let token = read_token_file(&path).await.unwrap();

    assert!(authority.check(token.expose_secret()));
}

#[tokio::test]
async fn test_reinit_replaces_token() {
    let fixture = RuntimeDirFixture::new().unwrap();
    let mut authority =
        TokenAuthority::new("myapp.token").with_path_resolver(fixture.fixed_resolver());

    let path = authority.init().await.unwrap();
    let first = std::fs::read_to_string(&path).unwrap();

    let path = authority.init().await.unwrap();
    let second = std::fs::read_to_string(&path).unwrap();

    assert_ne!(first, second);
    assert!(authority.check(&second));
    assert!(!authority.check(&first));
}

#[tokio::test]
async fn test_reinit_with_existing_directory() {
    let fixture = RuntimeDirFixture::new().unwrap();
    std::fs::create_dir_all(fixture.token_path("nested")).unwrap();
    let mut authority =
        TokenAuthority::new("nested/app.token").with_path_resolver(fixture.fixed_resolver());

    for _ in 0..3 {
        authority.init().await.unwrap();
    }
    assert!(authority.is_ready());
}

#[tokio::test]
async fn test_logger_called_once_per_init() {
    let fixture = RuntimeDirFixture::new().unwrap();
    let logger = RecordingLogger::new();
    let mut authority = TokenAuthority::new("myapp.token")
        .with_logger(logger.clone())
        .with_path_resolver(fixture.fixed_resolver());

    let path = authority.init().await.unwrap();

    assert_eq!(logger.messages(), vec![format!("token: {}", path.display())]);

    authority.init().await.unwrap();
    assert_eq!(logger.count(), 2);
}

#[tokio::test]
async fn test_check_is_silent() {
    let fixture = RuntimeDirFixture::new().unwrap();
    let logger = RecordingLogger::new();
    let mut authority = TokenAuthority::new("myapp.token")
        .with_logger(logger.clone())
        .with_path_resolver(fixture.fixed_resolver());
    authority.init().await.unwrap();
    logger.clear();

    assert!(!authority.check("wrong"));
    assert_eq!(logger.count(), 0);
}

#[tokio::test]
async fn test_missing_runtime_dir_fails_init() {
    let resolver = local_token::RuntimeDirResolver::new().with_lookup(|_| None);
    let logger = RecordingLogger::new();
    let mut authority = TokenAuthority::new("myapp.token")
        .with_logger(logger.clone())
        .with_path_resolver(resolver);

    let err = authority.init().await.unwrap_err();

    assert!(matches!(err, TokenError::MissingRuntimeDir { .. }));
    assert!(err.is_config_error());
    assert!(!authority.is_ready());
    assert_eq!(logger.count(), 0);
}

#[tokio::test]
async fn test_unset_process_runtime_dir_fails_init() {
    let mut authority = TokenAuthority::new("myapp.token")
        .with_path_resolver(RuntimeDirResolver::new().with_var("LOCAL_TOKEN_UNSET_RUNTIME_DIR"));

    let err = authority.init().await.unwrap_err();

    assert!(matches!(
        err,
        TokenError::MissingRuntimeDir { ref var } if var == "LOCAL_TOKEN_UNSET_RUNTIME_DIR"
    ));
    assert!(!authority.is_ready());
    assert!(!authority.check(""));
}

#[tokio::test]
async fn test_escaping_file_id_fails_init() {
    let fixture = RuntimeDirFixture::new().unwrap();
    let logger = RecordingLogger::new();
    let mut authority = TokenAuthority::new("../outside.token")
        .with_logger(logger.clone())
        .with_path_resolver(fixture.env_resolver());

    let err = authority.init().await.unwrap_err();

    assert!(matches!(err, TokenError::InvalidFileId { .. }));
    assert!(err.is_config_error());
    assert!(!authority.is_ready());
    assert_eq!(logger.count(), 0);
    assert!(!fixture.root().join("outside.token").exists());
}

#[tokio::test]
async fn test_failing_resolver_fails_init() {
    let mut authority =
        TokenAuthority::new("myapp.token").with_path_resolver(FailingPathResolver::default());

    let err = authority.init().await.unwrap_err();
    assert!(matches!(err, TokenError::Resolve(_)));
    assert!(!authority.check(""));
}

#[tokio::test]
async fn test_concurrent_checks_after_init() {
    let fixture = RuntimeDirFixture::new().unwrap();
    let mut authority =
        TokenAuthority::new("myapp.token").with_path_resolver(fixture.fixed_resolver());
    let path = authority.init().await.unwrap();
    let token = std::fs::read_to_string(path).unwrap();

    let authority = Arc::new(authority);
    let mut handles = Vec::new();
    for i in 0..8 {
        let authority = Arc::clone(&authority);
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                authority.check(&token)
            } else {
                !authority.check(&token[..i])
            }
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap());
    }
}

#[test]
fn test_no_collisions_in_generated_tokens() {
    let tokens: HashSet<String> = (0..1000).map(|_| generate_token().to_string()).collect();
    assert_eq!(tokens.len(), 1000);
}

#[tokio::test]
async fn test_independent_authorities_differ() {
    let fixture = RuntimeDirFixture::new().unwrap();
    let mut a = TokenAuthority::new("a.token").with_path_resolver(fixture.fixed_resolver());
    let mut b = TokenAuthority::new("b.token").with_path_resolver(fixture.fixed_resolver());

    let token_a = std::fs::read_to_string(a.init().await.unwrap()).unwrap();
    let token_b = std::fs::read_to_string(b.init().await.unwrap()).unwrap();

    assert_ne!(token_a, token_b);
    assert!(!a.check(&token_b));
    assert!(!b.check(&token_a));
}
