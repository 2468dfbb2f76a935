// src/services/auth.rs

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::principal::{Principal, Role},
};

// Estrutura de dados ("claims") dentro do JWT emitido pelo serviço de identidade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,            // Subject (ID do usuário)
    pub role: Role,           // Cargo
    pub org: Option<Uuid>,    // Organização, se houver
    pub rst: Option<Uuid>,    // Restaurante, se houver
    pub exp: usize,           // Expiration time
    pub iat: usize,           // Issued At
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Principal {
            id: claims.sub,
            role: claims.role,
            organization_id: claims.org,
            restaurant_id: claims.rst,
        }
    }
}

// Aqui só se valida token. Emissão de token e login ficam no serviço de contas.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    pub fn new(jwt_secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Principal, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("Token rejeitado: {}", e);
            AppError::InvalidToken
        })?;

        Ok(token_data.claims.into())
    }
}
