// Default URLs
pub static DEFAULT_TRIODOS_BASE_URL: &str = "https://xs2a-sandbox.triodos.com";
pub static DEFAULT_ABN_AMRO_AUTH_URL: &str = "https://auth-mtls-sandbox.abnamro.com";
pub static DEFAULT_ABN_AMRO_AUTHORIZE_URL: &str = "https://auth-sandbox.abnamro.com";
pub static DEFAULT_ABN_AMRO_API_URL: &str = "https://api-sandbox.abnamro.com";
pub static DEFAULT_RABOBANK_AUTH_URL: &str =
    "https://oauth-sandbox.rabobank.nl/openapi/sandbox/oauth2-premium";
pub static DEFAULT_RABOBANK_API_URL: &str = "https://api-sandbox.rabobank.nl";

// Header names. Kept lowercase because the signing-string lines use the
// lowercase form and the same constants feed both sides.
pub const X_REQUEST_ID_HEADER: &str = "x-request-id";
pub const DIGEST_HEADER: &str = "digest";
pub const DATE_HEADER: &str = "date";
pub const SIGNATURE_HEADER: &str = "signature";
pub const CONSENT_ID_HEADER: &str = "consent-id";
pub const PSU_IP_ADDRESS_HEADER: &str = "psu-ip-address";
pub const TPP_REDIRECT_URI_HEADER: &str = "tpp-redirect-uri";
pub const TPP_SIGNATURE_CERTIFICATE_HEADER: &str = "tpp-signature-certificate";
pub const SSL_CERTIFICATE_HEADER: &str = "ssl-certificate";
pub const SIGNATURE_CERTIFICATE_HEADER: &str = "signature-certificate";
pub const X_IBM_CLIENT_ID_HEADER: &str = "x-ibm-client-id";
pub const API_KEY_HEADER: &str = "api-key";
pub const ACCEPT_HEADER: &str = "accept";

/// HTTP client used when a builder is not handed one explicitly.
///
/// Redirects are never followed: the authorization endpoints answer with a
/// 302 whose `Location` header is the value callers are after.
pub(crate) fn default_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build the default HTTP client")
}

/// Strips the PEM armor and newlines from a certificate so it can travel in
/// an HTTP header (`TPP-Signature-Certificate`, `Signature-Certificate`).
pub fn certificate_header_value(certificate_pem: &str) -> String {
    certificate_pem
        .replace("-----BEGIN CERTIFICATE-----", "")
        .replace("-----END CERTIFICATE-----", "")
        .replace(['\r', '\n'], "")
        .trim()
        .to_string()
}
