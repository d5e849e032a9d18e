//! User accounts: sign-up with a user-chosen ID and email/password login.
//!
//! Passwords are never stored: each account keeps a PBKDF2-HMAC-SHA256 hash,
//! its random salt and the iteration count it was hashed with.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::RngCore;
use rusqlite::{params, Connection, OptionalExtension};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::db::{open_database, DatabaseError};
use crate::models::{AuthRequest, AuthResponse, UserRecord};

pub const DEFAULT_HASH_ITERATIONS: u32 = 600_000;
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

pub const EMAIL_TAKEN: &str = "Email already registered!";
pub const EMPTY_ID: &str = "User ID cannot be empty.";
pub const SIGNUP_OK: &str = "Account created successfully!";
pub const INVALID_LOGIN: &str = "Invalid email or password";

/// Emails compare case-insensitively and without surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// User IDs are stored upper-cased.
pub fn normalize_user_id(custom_id: &str) -> String {
    custom_id.trim().to_uppercase()
}

fn hash_password(password: &str, salt: &[u8], iterations: u32) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out);
    out
}

struct StoredCredentials {
    user: UserRecord,
    hash: String,
    salt: String,
    iterations: u32,
}

impl StoredCredentials {
    fn verify(&self, password: &str) -> Result<bool, DatabaseError> {
        let corrupt = |reason: String| DatabaseError::CorruptRecord {
            table: "users".to_string(),
            reason,
        };
        let salt = BASE64
            .decode(&self.salt)
            .map_err(|e| corrupt(format!("salt for {}: {e}", self.user.id)))?;
        let expected = BASE64
            .decode(&self.hash)
            .map_err(|e| corrupt(format!("hash for {}: {e}", self.user.id)))?;
        let actual = hash_password(password, &salt, self.iterations);
        Ok(actual[..].ct_eq(&expected[..]).into())
    }
}

/// SQLite-backed account store. Opens a connection per call so it can be
/// shared across request handlers without locking.
#[derive(Debug, Clone)]
pub struct UserStore {
    db_path: PathBuf,
    iterations: u32,
}

impl UserStore {
    pub fn new(db_path: &Path) -> Self {
        Self::with_iterations(db_path, DEFAULT_HASH_ITERATIONS)
    }

    pub fn with_iterations(db_path: &Path, iterations: u32) -> Self {
        Self {
            db_path: db_path.to_path_buf(),
            iterations: iterations.max(1),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open the database once so schema problems surface at startup.
    pub fn initialize(&self) -> Result<(), DatabaseError> {
        open_database(&self.db_path).map(|_| ())
    }

    fn connect(&self) -> Result<Connection, DatabaseError> {
        open_database(&self.db_path)
    }

    /// Register a new account. Business-rule failures come back as an
    /// error-status `AuthResponse`; only storage failures are `Err`.
    pub fn signup(&self, req: &AuthRequest) -> Result<AuthResponse, DatabaseError> {
        let email = normalize_email(&req.email);
        let user_id = normalize_user_id(&req.custom_id);
        tracing::info!(user_id = %user_id, "Signup attempt");

        let conn = self.connect()?;

        if email_exists(&conn, &email)? {
            return Ok(AuthResponse::error(EMAIL_TAKEN));
        }
        if user_id.is_empty() {
            return Ok(AuthResponse::error(EMPTY_ID));
        }
        if id_exists(&conn, &user_id)? {
            return Ok(AuthResponse::error(format!("ID '{user_id}' is already taken.")));
        }

        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let hash = hash_password(&req.password, &salt, self.iterations);

        let inserted = conn.execute(
            "INSERT INTO users (id, email, password_hash, password_salt, hash_iterations, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user_id,
                email,
                BASE64.encode(hash),
                BASE64.encode(salt),
                self.iterations,
                chrono::Utc::now().to_rfc3339(),
            ],
        );

        match inserted {
            Ok(_) => {
                tracing::info!(user_id = %user_id, "Account created");
                Ok(AuthResponse::success(SIGNUP_OK))
            }
            // Lost a race with a concurrent signup for the same email or ID.
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                if email_exists(&conn, &email)? {
                    Ok(AuthResponse::error(EMAIL_TAKEN))
                } else {
                    Ok(AuthResponse::error(format!("ID '{user_id}' is already taken.")))
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse, DatabaseError> {
        let email = normalize_email(email);
        let conn = self.connect()?;

        let Some(stored) = find_credentials(&conn, &email)? else {
            tracing::info!("Login failed: unknown email");
            return Ok(AuthResponse::error(INVALID_LOGIN));
        };

        if stored.verify(password)? {
            tracing::info!(user_id = %stored.user.id, "Login successful");
            Ok(AuthResponse::logged_in(&stored.user))
        } else {
            tracing::info!(user_id = %stored.user.id, "Login failed: wrong password");
            Ok(AuthResponse::error(INVALID_LOGIN))
        }
    }
}

fn email_exists(conn: &Connection, email: &str) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE email = ?1",
        [email],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn id_exists(conn: &Connection, user_id: &str) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE id = ?1",
        [user_id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn find_credentials(
    conn: &Connection,
    email: &str,
) -> Result<Option<StoredCredentials>, DatabaseError> {
    conn.query_row(
        "SELECT id, email, created_at, password_hash, password_salt, hash_iterations
         FROM users WHERE email = ?1",
        [email],
        |row| {
            Ok(StoredCredentials {
                user: UserRecord {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    created_at: row.get(2)?,
                },
                hash: row.get(3)?,
                salt: row.get(4)?,
                iterations: row.get(5)?,
            })
        },
    )
    .optional()
    .map_err(DatabaseError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthStatus;

    fn store() -> (tempfile::TempDir, UserStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::with_iterations(&dir.path().join("users.db"), 10);
        store.initialize().unwrap();
        (dir, store)
    }

    fn req(email: &str, password: &str, id: &str) -> AuthRequest {
        AuthRequest {
            email: email.into(),
            password: password.into(),
            custom_id: id.into(),
        }
    }

    #[test]
    fn signup_then_login() {
        let (_dir, store) = store();
        let resp = store.signup(&req("asha@example.com", "s3cret", " nc101 ")).unwrap();
        assert_eq!(resp.status, AuthStatus::Success);
        assert_eq!(resp.message, "Account created successfully!");

        let login = store.login("asha@example.com", "s3cret").unwrap();
        assert_eq!(login.message, "Login successful");
        assert_eq!(login.user_id.as_deref(), Some("NC101"));
        assert_eq!(login.email.as_deref(), Some("asha@example.com"));
    }

    #[test]
    fn duplicate_email_rejected_first() {
        let (_dir, store) = store();
        store.signup(&req("a@x.com", "pw", "ONE")).unwrap();
        let resp = store.signup(&req("a@x.com", "pw", "ONE")).unwrap();
        assert_eq!(resp.status, AuthStatus::Error);
        assert_eq!(resp.message, "Email already registered!");
    }

    #[test]
    fn email_match_ignores_case_and_spaces() {
        let (_dir, store) = store();
        store.signup(&req("Asha@Example.com", "pw", "A1")).unwrap();
        let resp = store.signup(&req("  asha@example.COM ", "pw", "B2")).unwrap();
        assert_eq!(resp.message, "Email already registered!");
        assert!(store.login("ASHA@example.com", "pw").unwrap().is_success());
    }

    #[test]
    fn duplicate_id_rejected_case_insensitively() {
        let (_dir, store) = store();
        store.signup(&req("a@x.com", "pw", "NC7")).unwrap();
        let resp = store.signup(&req("b@x.com", "pw", "nc7")).unwrap();
        assert_eq!(resp.status, AuthStatus::Error);
        assert_eq!(resp.message, "ID 'NC7' is already taken.");
    }

    #[test]
    fn blank_id_rejected() {
        let (_dir, store) = store();
        let resp = store.signup(&req("a@x.com", "pw", "   ")).unwrap();
        assert_eq!(resp.message, "User ID cannot be empty.");
        let conn = open_database(store.db_path()).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn wrong_password_and_unknown_email_look_the_same() {
        let (_dir, store) = store();
        store.signup(&req("a@x.com", "right", "U1")).unwrap();
        let wrong = store.login("a@x.com", "wrong").unwrap();
        let unknown = store.login("nobody@x.com", "right").unwrap();
        assert_eq!(wrong, unknown);
        assert_eq!(wrong.message, "Invalid email or password");
        assert!(wrong.user_id.is_none());
    }

    #[test]
    fn password_is_not_stored_in_plain_text() {
        let (_dir, store) = store();
        store.signup(&req("a@x.com", "hunter2", "U1")).unwrap();
        let conn = open_database(store.db_path()).unwrap();
        let (hash, salt): (String, String) = conn
            .query_row(
                "SELECT password_hash, password_salt FROM users WHERE id = 'U1'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_ne!(hash, "hunter2");
        assert_eq!(BASE64.decode(salt).unwrap().len(), SALT_LEN);
        assert_eq!(BASE64.decode(hash).unwrap().len(), HASH_LEN);
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let (_dir, store) = store();
        store.signup(&req("a@x.com", "same", "U1")).unwrap();
        store.signup(&req("b@x.com", "same", "U2")).unwrap();
        let conn = open_database(store.db_path()).unwrap();
        let hashes: Vec<String> = conn
            .prepare("SELECT password_hash FROM users ORDER BY id")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_ne!(hashes[0], hashes[1]);
    }

    #[test]
    fn signup_stores_normalized_id() {
        let (_dir, store) = store();
        store.signup(&req("a@x.com", "pw", " zed ")).unwrap();
        let conn = open_database(store.db_path()).unwrap();
        let (email, created_at): (String, String) = conn
            .query_row(
                "SELECT email, created_at FROM users WHERE id = 'ZED'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(email, "a@x.com");
        assert!(!created_at.is_empty());
    }

    #[test]
    fn hashing_is_deterministic_for_same_salt() {
        let salt = [7u8; SALT_LEN];
        assert_eq!(hash_password("pw", &salt, 5), hash_password("pw", &salt, 5));
        assert_ne!(hash_password("pw", &salt, 5), hash_password("pw", &salt, 6));
    }
}
