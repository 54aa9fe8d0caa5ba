use anyhow::Context;
use psd2_rust::{
    abn_amro::AbnAmroClient, signing::Credential, triodos::TriodosClient,
};

/// Settings for running the suite against the real bank sandboxes.
///
/// Read from `tests/acceptance.toml` when present, with
/// `ACCEPTANCE_TESTS_`-prefixed environment variables taking precedence.
#[derive(serde::Deserialize, Debug)]
struct Settings {
    triodos_tenant: String,
    triodos_client_id: String,
    triodos_client_secret: String,
    abn_amro_client_id: String,
    abn_amro_api_key: String,
    signing_key_id: String,
    signing_private_key_file: String,
    #[serde(default)]
    signing_certificate_file: Option<String>,
    account_iban: String,
}

impl Settings {
    fn read() -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::with_name("tests/acceptance").required(false))
            .add_source(config::Environment::with_prefix("ACCEPTANCE_TESTS"))
            .build()?
            .try_deserialize()
            .context("Failed to assemble the acceptance test settings")
    }
}

/// Test context to run tests against the real bank sandboxes.
pub struct TestContext {
    pub triodos: TriodosClient,
    pub abn_amro: AbnAmroClient,
    pub client_id: String,
    pub client_secret: String,
    account_iban: String,
}

impl TestContext {
    /// Builds clients for the sandboxes from the acceptance settings.
    pub async fn start() -> Self {
        // Initialize tracing for nicer output on failing tests
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let settings = Settings::read().expect("Failed to read the acceptance test settings");

        let private_key_pem = std::fs::read(&settings.signing_private_key_file)
            .expect("Failed to read the signing private key");
        let signing_certificate = settings.signing_certificate_file.as_deref().map(|file| {
            std::fs::read_to_string(file).expect("Failed to read the signing certificate")
        });
        let credential = Credential {
            key_id: settings.signing_key_id,
            private_key_pem,
            signing_certificate,
        };

        let triodos = TriodosClient::new(settings.triodos_tenant, credential)
            .expect("Failed to build the Triodos client");
        let abn_amro = AbnAmroClient::new(settings.abn_amro_client_id, settings.abn_amro_api_key);

        Self {
            triodos,
            abn_amro,
            client_id: settings.triodos_client_id,
            client_secret: settings.triodos_client_secret,
            account_iban: settings.account_iban,
        }
    }

    /// IBAN of the sandbox account granted to the acceptance credentials.
    pub fn account_iban(&self) -> &str {
        &self.account_iban
    }
}
