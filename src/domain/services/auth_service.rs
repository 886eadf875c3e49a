use std::sync::Arc;
use crate::domain::{
    models::{account::Account, auth::{Claims, RefreshTokenRecord}},
    ports::AuthRepository
};
use crate::error::AppError;
use crate::config::Config;
use jsonwebtoken::{encode, EncodingKey, Header, Algorithm};
use uuid::Uuid;
use chrono::{Utc, Duration};
use rand::{distributions::Alphanumeric, Rng};
use sha2::{Sha256, Digest};
use tracing::{info, warn};

pub const TOKEN_AUDIENCE: &str = "club-registry-frontend";

pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    config: Config,
    encoding_key: EncodingKey,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>, config: Config) -> Result<Self, AppError> {
        let encoding_key = EncodingKey::from_ed_pem(config.jwt_secret_key.as_bytes())
            .map_err(|e| {
                tracing::error!("Invalid JWT private key: {}", e);
                AppError::Internal
            })?;

        Ok(Self { repo, config, encoding_key })
    }

    pub async fn login(&self, account: &Account) -> Result<(String, String, String), AppError> {
        let family_id = Uuid::new_v4();
        self.issue_token_pair(account, family_id, 1).await
    }

    /// Looks up the account id behind a raw refresh token.
    pub async fn refresh_owner(&self, raw_refresh_token: &str) -> Result<String, AppError> {
        let token_hash = self.hash_token(raw_refresh_token);
        let record = self.repo.find(&token_hash).await?
            .ok_or(AppError::Unauthorized)?;
        Ok(record.user_id)
    }

    pub async fn refresh(&self, raw_refresh_token: &str, account: &Account) -> Result<(String, String, String), AppError> {
        let token_hash = self.hash_token(raw_refresh_token);

        // Two refreshes racing on one token: only one consume returns it.
        let record = self.repo.consume(&token_hash).await?
            .ok_or(AppError::Unauthorized)?;

        if record.expires_at < Utc::now() {
            let revoked = self.repo.revoke_family(record.family_id).await?;
            warn!("Expired refresh token presented for {}, revoked {} more in its family", record.user_id, revoked);
            return Err(AppError::Unauthorized);
        }

        self.issue_token_pair(account, record.family_id, record.generation_id + 1).await
    }

    pub async fn logout(&self, raw_refresh_token: &str) -> Result<(), AppError> {
        let token_hash = self.hash_token(raw_refresh_token);
        self.repo.consume(&token_hash).await?;
        Ok(())
    }

    /// Ends every session of an account, e.g. after a password or role change.
    pub async fn revoke_sessions(&self, user_id: &str) -> Result<u64, AppError> {
        let revoked = self.repo.revoke_all_for_account(user_id).await?;
        if revoked > 0 {
            info!("Revoked {} refresh tokens for {}", revoked, user_id);
        }
        Ok(revoked)
    }

    async fn issue_token_pair(&self, account: &Account, family_id: Uuid, generation_id: i32) -> Result<(String, String, String), AppError> {
        let csrf_token: String = rand::thread_rng().sample_iter(&Alphanumeric).take(32).map(char::from).collect();
        let now = Utc::now();
        let exp = (now + Duration::minutes(15)).timestamp() as usize;

        let claims = Claims {
            iss: self.config.auth_issuer.clone(),
            sub: account.user_id.clone(),
            aud: TOKEN_AUDIENCE.to_string(),
            exp,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            role: account.role.clone(),
            csrf_token: csrf_token.clone(),
        };

        let access_token = encode(&Header::new(Algorithm::EdDSA), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("JWT encoding failed: {}", e);
                AppError::Internal
            })?;

        let refresh_token: String = rand::thread_rng().sample_iter(&Alphanumeric).take(64).map(char::from).collect();
        let refresh_token_hash = self.hash_token(&refresh_token);

        let refresh_record = RefreshTokenRecord {
            token_hash: refresh_token_hash,
            user_id: account.user_id.clone(),
            family_id,
            generation_id,
            expires_at: now + Duration::days(7),
            created_at: now,
        };

        self.repo.store(&refresh_record).await?;
        Ok((access_token, refresh_token, csrf_token))
    }

    pub fn hash_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}
