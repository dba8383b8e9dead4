use super::*;
use axum::http::Request;

const SECRET: &str = "supersecretjwtsecretforunittesting123";

#[test]
fn test_issue_and_validate_admin_token() {
    let token = issue_admin_token("admin@shadoom.com", SECRET).unwrap();

    let claims = validate_admin_token(&token, SECRET).expect("Valid token should pass");
    assert_eq!(claims.sub, "admin@shadoom.com");
    assert_eq!(claims.role, ADMIN_ROLE);
}

#[test]
fn test_validate_admin_token_expired() {
    let my_claims = AdminClaims {
        sub: "admin@shadoom.com".to_string(),
        role: ADMIN_ROLE.to_string(),
        exp: 1, // past
    };

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert!(validate_admin_token(&token, SECRET).is_err());
}

#[test]
fn test_validate_admin_token_invalid_signature() {
    let token = issue_admin_token("admin@shadoom.com", "wrongsecret").unwrap();

    assert!(validate_admin_token(&token, SECRET).is_err());
}

#[test]
fn test_validate_admin_token_rejects_other_roles() {
    let my_claims = AdminClaims {
        sub: "someone@shadoom.com".to_string(),
        role: "user".to_string(),
        exp: 9999999999, // far future
    };

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert!(validate_admin_token(&token, SECRET).is_err());
}

#[tokio::test]
async fn test_bearer_token_extraction() {
    let (mut parts, _) = Request::builder()
        .header("Authorization", "Bearer abc.def.ghi")
        .body(())
        .unwrap()
        .into_parts();

    let BearerToken(token) = BearerToken::from_request_parts(&mut parts, &())
        .await
        .unwrap();
    assert_eq!(token, "abc.def.ghi");
}

#[tokio::test]
async fn test_bearer_token_missing_header() {
    let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();

    let rejection = BearerToken::from_request_parts(&mut parts, &())
        .await
        .unwrap_err();
    assert_eq!(rejection.0, StatusCode::UNAUTHORIZED);
}
