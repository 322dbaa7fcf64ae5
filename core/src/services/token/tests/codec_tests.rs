//! Unit tests for the token codec

use chrono::{Duration, Utc};
use jsonwebtoken::Algorithm;

use crate::domain::entities::token::{Claims, TokenKind};
use crate::services::token::{CodecError, TokenCodec, TokenServiceConfig};

fn config() -> TokenServiceConfig {
    TokenServiceConfig {
        jwt_secret: "codec-test-secret".to_string(),
        ..TokenServiceConfig::default()
    }
}

fn codec() -> TokenCodec {
    TokenCodec::new(&config()).unwrap()
}

fn access_claims() -> Claims {
    let config = config();
    Claims::access(
        "a@x.com",
        Utc::now(),
        Duration::minutes(15),
        &config.issuer,
        &config.audience,
    )
}

fn refresh_claims() -> Claims {
    let config = config();
    Claims::refresh(
        "a@x.com",
        "sid-1",
        Utc::now(),
        Duration::days(30),
        &config.issuer,
        &config.audience,
    )
}

#[test]
fn test_encode_decode() {
    let codec = codec();
    let claims = refresh_claims();
    let token = codec.encode(&claims).unwrap();

    let decoded = codec.decode(&token, TokenKind::Refresh, Utc::now()).unwrap();
    assert_eq!(decoded, claims);
}

#[test]
fn test_wrong_kind_is_rejected() {
    let codec = codec();
    let access = codec.encode(&access_claims()).unwrap();
    let refresh = codec.encode(&refresh_claims()).unwrap();

    assert_eq!(
        codec.decode(&access, TokenKind::Refresh, Utc::now()),
        Err(CodecError::WrongKind)
    );
    assert_eq!(
        codec.decode(&refresh, TokenKind::Access, Utc::now()),
        Err(CodecError::WrongKind)
    );
}

#[test]
fn test_garbage_is_malformed() {
    let codec = codec();
    for garbage in ["", "not-a-token", "a.b.c", "...."] {
        assert_eq!(
            codec.decode(garbage, TokenKind::Access, Utc::now()),
            Err(CodecError::Malformed),
            "input: {:?}",
            garbage
        );
    }
}

#[test]
fn test_tampered_signature() {
    let codec = codec();
    let token = codec.encode(&access_claims()).unwrap();

    let (head, signature) = token.rsplit_once('.').unwrap();
    let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
    let tampered = format!("{}.{}{}", head, flipped, &signature[1..]);

    assert_eq!(
        codec.decode(&tampered, TokenKind::Access, Utc::now()),
        Err(CodecError::BadSignature)
    );
}

#[test]
fn test_foreign_secret_is_bad_signature() {
    let foreign = TokenCodec::new(&TokenServiceConfig {
        jwt_secret: "someone-else".to_string(),
        ..config()
    })
    .unwrap();
    let token = foreign.encode(&access_claims()).unwrap();

    assert_eq!(
        codec().decode(&token, TokenKind::Access, Utc::now()),
        Err(CodecError::BadSignature)
    );
}

#[test]
fn test_foreign_issuer_is_malformed() {
    let foreign = TokenCodec::new(&TokenServiceConfig {
        issuer: "elsewhere".to_string(),
        ..config()
    })
    .unwrap();
    let mut claims = access_claims();
    claims.iss = "elsewhere".to_string();
    let token = foreign.encode(&claims).unwrap();

    assert_eq!(
        codec().decode(&token, TokenKind::Access, Utc::now()),
        Err(CodecError::Malformed)
    );
}

#[test]
fn test_access_expiry_has_no_leeway() {
    let codec = codec();
    let claims = access_claims();
    let token = codec.encode(&claims).unwrap();
    let exp = claims.expires_at().unwrap();

    assert!(codec.decode(&token, TokenKind::Access, exp).is_ok());
    assert_eq!(
        codec.decode(&token, TokenKind::Access, exp + Duration::seconds(1)),
        Err(CodecError::Expired)
    );
}

#[test]
fn test_refresh_expiry_respects_leeway() {
    let codec = codec();
    let claims = refresh_claims();
    let token = codec.encode(&claims).unwrap();
    let exp = claims.expires_at().unwrap();

    assert!(codec.decode(&token, TokenKind::Refresh, exp).is_ok());
    assert!(codec
        .decode(&token, TokenKind::Refresh, exp + Duration::seconds(60))
        .is_ok());
    assert_eq!(
        codec.decode(&token, TokenKind::Refresh, exp + Duration::seconds(61)),
        Err(CodecError::Expired)
    );
}

#[test]
fn test_refresh_without_session_id_is_malformed() {
    let codec = codec();
    let mut claims = refresh_claims();
    claims.jti = None;
    let token = codec.encode(&claims).unwrap();

    assert_eq!(
        codec.decode(&token, TokenKind::Refresh, Utc::now()),
        Err(CodecError::Malformed)
    );
}

#[test]
fn test_empty_subject_is_malformed() {
    let codec = codec();
    let mut claims = access_claims();
    claims.sub = String::new();
    let token = codec.encode(&claims).unwrap();

    assert_eq!(
        codec.decode(&token, TokenKind::Access, Utc::now()),
        Err(CodecError::Malformed)
    );
}

#[test]
fn test_algorithm_mismatch_is_rejected() {
    let hs512 = TokenCodec::new(&TokenServiceConfig {
        algorithm: Algorithm::HS512,
        ..config()
    })
    .unwrap();
    let token = hs512.encode(&access_claims()).unwrap();

    assert!(codec().decode(&token, TokenKind::Access, Utc::now()).is_err());
}

#[test]
fn test_asymmetric_algorithm_is_refused() {
    let result = TokenCodec::new(&TokenServiceConfig {
        algorithm: Algorithm::RS256,
        ..config()
    });
    assert!(result.is_err());
}

#[test]
fn test_empty_secret_is_refused() {
    let result = TokenCodec::new(&TokenServiceConfig {
        jwt_secret: String::new(),
        ..config()
    });
    assert!(result.is_err());
}
