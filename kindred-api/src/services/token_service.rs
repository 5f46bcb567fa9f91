use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use kindred_shared::errors::AppError;
use kindred_shared::types::auth::{Claims, UserRole};

/// 30-day bearer tokens; there is no refresh flow in this product.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

pub fn create_access_token(
    user_id: Uuid,
    role: UserRole,
    secret: &str,
) -> Result<String, AppError> {
    let claims = Claims::new(user_id, role, ACCESS_TOKEN_TTL_SECS);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(format!("JWT encoding failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    #[test]
    fn issued_token_decodes_with_the_same_secret() {
        let user_id = Uuid::now_v7();
        let token = create_access_token(user_id, UserRole::User, "test-secret").unwrap();

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, user_id);
        assert!(decoded.claims.exp > decoded.claims.iat);
    }

    #[test]
    fn wrong_secret_rejects() {
        let token = create_access_token(Uuid::now_v7(), UserRole::User, "secret-a").unwrap();
        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"secret-b"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
