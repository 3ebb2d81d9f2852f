#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::NaiveDate;
use identity_service::account::errors::AccountError;
use identity_service::account::models::Account;
use identity_service::account::models::AccountId;
use identity_service::account::models::ProfileUpdate;
use identity_service::account::models::Role;
use identity_service::account::ports::IdentityStore;
use identity_service::account::resolver::IdentityResolver;
use identity_service::account::service::AccountService;
use identity_service::config::GateConfig;
use identity_service::config::SessionConfig;
use identity_service::inbound::http::router::create_router;
use identity_service::inbound::http::routes::RouteClass;
use identity_service::inbound::http::routes::RouteRule;
use identity_service::inbound::http::routes::RouteTable;
use identity_service::session::issuer::SessionIssuer;

pub const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const LOOKUP_TIMEOUT: Duration = Duration::from_millis(200);

/// In-memory identity store standing in for one role's table
pub struct InMemoryIdentityStore {
    role: Role,
    accounts: Mutex<Vec<Account>>,
    delay: Option<Duration>,
    unavailable: bool,
}

impl InMemoryIdentityStore {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            accounts: Mutex::new(Vec::new()),
            delay: None,
            unavailable: false,
        }
    }

    pub fn with_account(
        self,
        id: &str,
        identifier: &str,
        password: Option<&str>,
        birth_date: Option<NaiveDate>,
        avatar: Option<&str>,
    ) -> Self {
        self.accounts.lock().unwrap().push(Account {
            id: AccountId::new(id),
            identifier: identifier.to_string(),
            name: format!("{} {}", self.role, identifier),
            role: self.role,
            password: password.map(str::to_string),
            birth_date,
            avatar: avatar.map(str::to_string),
        });
        self
    }

    /// Every lookup sleeps this long before answering
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every lookup fails as if the database were down
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn account(&self, id: &str) -> Option<Account> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id.as_str() == id)
            .cloned()
    }

    async fn lookup<F>(&self, matches: F) -> Result<Option<Account>, AccountError>
    where
        F: Fn(&Account) -> bool + Send,
    {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.unavailable {
            return Err(AccountError::StoreUnavailable {
                role: self.role,
                reason: "connection refused".to_string(),
            });
        }

        Ok(self.accounts.lock().unwrap().iter().find(|a| matches(a)).cloned())
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    fn role(&self) -> Role {
        self.role
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, AccountError> {
        self.lookup(|a| a.identifier == identifier).await
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        self.lookup(|a| &a.id == id).await
    }

    async fn update_profile(
        &self,
        id: &AccountId,
        update: &ProfileUpdate,
    ) -> Result<(), AccountError> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;

        account.name = update.name.clone();
        if let Some(avatar) = &update.avatar {
            account.avatar = Some(avatar.clone());
        }
        if let Some(hash) = &update.password_hash {
            account.password = Some(hash.clone());
        }
        Ok(())
    }

    async fn update_password(
        &self,
        id: &AccountId,
        password_hash: &str,
    ) -> Result<(), AccountError> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;

        account.password = Some(password_hash.to_string());
        Ok(())
    }
}

pub fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Default seed:
/// * admins: `admin` / plaintext `admin-pass` with an inline avatar, `shared` / bcrypt `admin-shared`
/// * students: `660001` unset password born 2005-01-15 with an inline avatar,
///   `660002` / bcrypt `student-pass`, `shared` unset password
/// * teachers: `T001` / plaintext `custom-pass` born 1980-06-30
pub fn seeded_stores() -> [InMemoryIdentityStore; 3] {
    let admin_shared = bcrypt::hash("admin-shared", 4).unwrap();
    let student_pass = bcrypt::hash("student-pass", 4).unwrap();

    [
        InMemoryIdentityStore::new(Role::Admin)
            .with_account(
                "1",
                "admin",
                Some("admin-pass"),
                None,
                Some("data:image/png;base64,iVBORw0KGgo="),
            )
            .with_account("2", "shared", Some(admin_shared.as_str()), None, None),
        InMemoryIdentityStore::new(Role::Student)
            .with_account(
                "101",
                "660001",
                None,
                date(2005, 1, 15),
                Some("data:image/jpeg;base64,/9j/4AAQ"),
            )
            .with_account("102", "660002", Some(student_pass.as_str()), date(2006, 2, 1), None)
            .with_account("103", "shared", None, date(2006, 3, 3), None),
        InMemoryIdentityStore::new(Role::Teacher).with_account(
            "201",
            "T001",
            Some("custom-pass"),
            date(1980, 6, 30),
            Some("/avatars/t001.png"),
        ),
    ]
}

pub fn gate_config() -> GateConfig {
    GateConfig {
        login_path: "/login".to_string(),
        landing_path: "/dashboard".to_string(),
        dotted_paths_are_assets: true,
        routes: vec![
            RouteRule::new("/_next", RouteClass::Asset),
            RouteRule::new("/favicon", RouteClass::Asset),
            RouteRule::new("/login", RouteClass::Public),
            RouteRule::new("/api/auth", RouteClass::Public),
            RouteRule::new("/api/setup", RouteClass::Public),
            RouteRule::new("/dashboard", RouteClass::Protected),
            RouteRule::new("/schedule", RouteClass::Protected),
            RouteRule::new("/print", RouteClass::Protected),
        ],
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub admins: Arc<InMemoryIdentityStore>,
    pub students: Arc<InMemoryIdentityStore>,
    pub teachers: Arc<InMemoryIdentityStore>,
}

impl TestApp {
    /// Spawn the application over the default seed
    pub async fn spawn() -> Self {
        let [admins, students, teachers] = seeded_stores();
        Self::spawn_with(admins, students, teachers).await
    }

    /// Spawn the application over the given stores
    pub async fn spawn_with(
        admins: InMemoryIdentityStore,
        students: InMemoryIdentityStore,
        teachers: InMemoryIdentityStore,
    ) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let admins = Arc::new(admins);
        let students = Arc::new(students);
        let teachers = Arc::new(teachers);

        let resolver = IdentityResolver::new(
            vec![
                admins.clone() as Arc<dyn IdentityStore>,
                students.clone() as Arc<dyn IdentityStore>,
                teachers.clone() as Arc<dyn IdentityStore>,
            ],
            LOOKUP_TIMEOUT,
        );

        let authenticator = Arc::new(Authenticator::new(SECRET, 24));
        let account_service = Arc::new(AccountService::new(
            resolver,
            authenticator.password_hasher(),
            false,
        ));
        let session_issuer = Arc::new(SessionIssuer::new(Arc::clone(&authenticator)));
        let route_table = Arc::new(RouteTable::new(&gate_config()));

        let session = SessionConfig {
            secret: None,
            expiration_hours: 24,
            cookie_name: "session_token".to_string(),
            secure_cookie: false,
            allow_insecure_fallback_secret: false,
        };

        let router = create_router(account_service, session_issuer, route_table, &session);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("Failed to create reqwest client"),
            authenticator,
            admins,
            students,
            teachers,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token, bypassing the cookie store
    pub fn get_with_bearer(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create reqwest client")
            .get(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// POST the login form; the session cookie lands in the client's cookie store
    pub async fn login(&self, identifier: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&serde_json::json!({
                "username": identifier,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to send login request")
    }
}
