use crate::common::mock_bank::{
    MockBankConfiguration, MockBankStorage, MOCK_ACCOUNT_HOLDER,
};
use actix_web::{web, HttpRequest, HttpResponse};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use psd2_rust::{abn_amro, triodos};
use serde_json::json;
use uuid::Uuid;

fn base_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}", info.scheme(), info.host())
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    Some(
        req.headers()
            .get("authorization")?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")?
            .to_string(),
    )
}

fn basic_credentials(req: &HttpRequest) -> Option<(String, String)> {
    let encoded = req
        .headers()
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Basic ")?;
    let decoded = String::from_utf8(BASE64.decode(encoded).ok()?).ok()?;
    let (client_id, client_secret) = decoded.split_once(':')?;
    Some((client_id.to_string(), client_secret.to_string()))
}

fn header(req: &HttpRequest, name: &str) -> Option<String> {
    Some(req.headers().get(name)?.to_str().ok()?.to_string())
}

/// Berlin Group error envelope, as the Triodos XS2A endpoints answer.
fn tpp_messages(code: &str, text: &str) -> serde_json::Value {
    json!({ "tppMessages": [{ "category": "ERROR", "code": code, "text": text }] })
}

/// ABN AMRO gateway error envelope.
fn gateway_errors(code: &str, message: &str, category: &str) -> serde_json::Value {
    json!({ "errors": [{ "code": code, "message": message, "category": category }] })
}

/// Two uppercase letters, two check digits, then up to thirty alphanumerics.
fn plausible_iban(iban: &str) -> bool {
    (15..=34).contains(&iban.len())
        && iban.chars().take(2).all(|c| c.is_ascii_uppercase())
        && iban.chars().skip(2).take(2).all(|c| c.is_ascii_digit())
}

// --- Triodos ---

/// GET /xs2a-bg/{tenant}/onboarding/v1
pub(super) async fn get_initial_access_token(
    req: HttpRequest,
    configuration: web::Data<MockBankConfiguration>,
) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "scope": "dynamicregistration",
        "access_token": configuration.initial_access_token,
        "expires_in": 1800,
        "token_type": "Bearer",
        "_links": {
            "registration": format!(
                "{}/auth/{}/v1/registration",
                base_url(&req),
                configuration.tenant
            )
        }
    }))
}

/// POST /auth/{tenant}/v1/registration
pub(super) async fn register_client(
    req: HttpRequest,
    configuration: web::Data<MockBankConfiguration>,
    form: web::Form<Vec<(String, String)>>,
) -> HttpResponse {
    // Registration is authorized by the one-off onboarding token
    if bearer_token(&req).as_deref() != Some(configuration.initial_access_token.as_str()) {
        return HttpResponse::Unauthorized().json(json!({ "error": "invalid_token" }));
    }

    let redirect_uris: Vec<String> = form
        .into_inner()
        .into_iter()
        .filter(|(key, _)| key == "redirect_uris")
        .map(|(_, value)| value)
        .collect();
    if redirect_uris.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "invalid_redirect_uri",
            "error_description": "There should be at least one redirect URI"
        }));
    }

    HttpResponse::Created().json(json!({
        "grant_types": ["authorization_code", "client_credentials", "refresh_token"],
        "application_type": "web",
        "client_secret_expires_at": 0,
        "redirect_uris": redirect_uris,
        "client_id_issued_at": Utc::now().timestamp(),
        "client_secret": configuration.client_secret,
        "tls_client_certificate_bound_access_tokens": true,
        "token_endpoint_auth_method": "client_secret_basic",
        "client_id": configuration.client_id,
        "response_types": ["code"],
        "id_token_signed_response_alg": "RS256"
    }))
}

/// POST /auth/{tenant}/v1/token
pub(super) async fn post_token(
    req: HttpRequest,
    configuration: web::Data<MockBankConfiguration>,
    form: web::Form<triodos::TokenRequest>,
) -> HttpResponse {
    // Confidential clients authenticate with HTTP basic auth
    match basic_credentials(&req) {
        Some((client_id, client_secret))
            if client_id == configuration.client_id
                && client_secret == configuration.client_secret => {}
        _ => return HttpResponse::BadRequest().json(json!({ "error": "invalid_client" })),
    }

    let form = form.into_inner();
    let granted = match form.grant_type {
        triodos::GrantType::ClientCredentials => true,
        triodos::GrantType::AuthorizationCode => form.code.is_some(),
        triodos::GrantType::RefreshToken => form.refresh_token.is_some(),
        _ => false,
    };
    if !granted {
        return HttpResponse::BadRequest().json(json!({ "error": "invalid_grant" }));
    }

    match form.grant_type {
        triodos::GrantType::ClientCredentials => HttpResponse::Ok().json(json!({
            "access_token": configuration.access_token,
            "scope": "payments",
            "token_type": "Bearer",
            "expires_in": 3600
        })),
        _ => HttpResponse::Ok().json(json!({
            "access_token": configuration.access_token,
            "scope": "openid offline_access accounts",
            "id_token": format!("header.{}.signature", Uuid::new_v4()),
            "token_type": "Bearer",
            "expires_in": 3600
        })),
    }
}

/// POST /xs2a-bg/{tenant}/v1/payments/sepa-credit-transfers
pub(super) async fn initiate_sepa_payment(
    req: HttpRequest,
    configuration: web::Data<MockBankConfiguration>,
    storage: web::Data<MockBankStorage>,
    body: web::Json<triodos::InitiateSepaPaymentRequest>,
) -> HttpResponse {
    // Payment initiation must carry the PSU context headers
    if header(&req, "psu-ip-address").is_none() || header(&req, "tpp-redirect-uri").is_none() {
        return HttpResponse::BadRequest().json(tpp_messages(
            "FORMAT_ERROR",
            "PSU-IP-Address and TPP-Redirect-URI are required",
        ));
    }
    if body.instructed_amount.currency != "EUR" {
        return HttpResponse::BadRequest().json(tpp_messages(
            "FORMAT_ERROR",
            "Only EUR credit transfers are accepted",
        ));
    }
    if !plausible_iban(&body.debtor_account.iban) || !plausible_iban(&body.creditor_account.iban) {
        return HttpResponse::BadRequest()
            .json(tpp_messages("FORMAT_ERROR", "Account reference is not an IBAN"));
    }

    let payment_id = Uuid::new_v4().to_string();
    let authorisation_id = Uuid::new_v4().to_string();
    storage
        .write()
        .unwrap()
        .triodos_payments
        .insert(payment_id.clone(), triodos::TransactionStatus::Rcvd);

    let base = base_url(&req);
    let tenant = &configuration.tenant;
    let resource = format!(
        "{}/xs2a-bg/{}/v1/payments/sepa-credit-transfers/{}",
        base, tenant, payment_id
    );
    HttpResponse::Created().json(json!({
        "transactionStatus": triodos::TransactionStatus::Rcvd,
        "paymentId": payment_id,
        "authorisationId": authorisation_id,
        "debtorAccount": { "iban": body.debtor_account.iban },
        "_links": {
            "scaRedirect": format!("{}/auth/{}/v1/auth?authorisationId={}", base, tenant, authorisation_id),
            "scaStatus": format!("{}/authorisations/{}", resource, authorisation_id),
            "self": resource,
            "status": format!("{}/status", resource)
        }
    }))
}

/// GET /xs2a-bg/{tenant}/v1/payments/sepa-credit-transfers/{id}/status
pub(super) async fn get_sepa_payment_status(
    storage: web::Data<MockBankStorage>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();

    storage
        .read()
        .unwrap()
        .triodos_payments
        .get(&id)
        .map_or_else(
            || HttpResponse::NotFound().json(tpp_messages("RESOURCE_UNKNOWN", "Unknown payment")),
            |status| HttpResponse::Ok().json(json!({ "transactionStatus": status })),
        )
}

/// POST /xs2a-bg/{tenant}/v1/consents
pub(super) async fn register_consent(
    req: HttpRequest,
    configuration: web::Data<MockBankConfiguration>,
    storage: web::Data<MockBankStorage>,
    body: web::Json<triodos::RegisterConsentRequest>,
) -> HttpResponse {
    if header(&req, "psu-ip-address").is_none() || header(&req, "tpp-redirect-uri").is_none() {
        return HttpResponse::BadRequest().json(tpp_messages(
            "FORMAT_ERROR",
            "PSU-IP-Address and TPP-Redirect-URI are required",
        ));
    }

    let consent_id = Uuid::new_v4().to_string();
    let authorisation_id = Uuid::new_v4().to_string();
    storage
        .write()
        .unwrap()
        .triodos_consents
        .insert(consent_id.clone(), triodos::ConsentStatus::Received);

    let base = base_url(&req);
    let tenant = &configuration.tenant;
    let resource = format!("{}/xs2a-bg/{}/v1/consents/{}", base, tenant, consent_id);
    HttpResponse::Created().json(json!({
        "consentStatus": triodos::ConsentStatus::Received,
        "consentId": consent_id,
        "authorisationId": authorisation_id,
        "access": body.access,
        "recurringIndicator": body.recurring_indicator,
        "validUntil": body.valid_until,
        "frequencyPerDay": body.frequency_per_day,
        "lastActionDate": Utc::now().date_naive(),
        "_links": {
            "scaRedirect": format!("{}/auth/{}/v1/auth?authorisationId={}", base, tenant, authorisation_id),
            "scaStatus": format!("{}/authorisations/{}", resource, authorisation_id),
            "self": resource,
            "status": format!("{}/status", resource)
        }
    }))
}

/// GET /xs2a-bg/{tenant}/v1/consents/{id}/status
pub(super) async fn get_consent_status(
    storage: web::Data<MockBankStorage>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();

    storage
        .read()
        .unwrap()
        .triodos_consents
        .get(&id)
        .map_or_else(
            || HttpResponse::NotFound().json(tpp_messages("CONSENT_UNKNOWN", "Unknown consent")),
            |status| HttpResponse::Ok().json(json!({ "consentStatus": status })),
        )
}

/// DELETE /xs2a-bg/{tenant}/v1/consents/{id}
pub(super) async fn delete_consent(
    storage: web::Data<MockBankStorage>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();

    match storage.write().unwrap().triodos_consents.remove(&id) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => HttpResponse::NotFound().json(tpp_messages("CONSENT_UNKNOWN", "Unknown consent")),
    }
}

/// GET /xs2a-bg/{tenant}/v1/accounts
pub(super) async fn list_accounts(
    req: HttpRequest,
    configuration: web::Data<MockBankConfiguration>,
    storage: web::Data<MockBankStorage>,
) -> HttpResponse {
    if bearer_token(&req).as_deref() != Some(configuration.access_token.as_str()) {
        return HttpResponse::Unauthorized().json(tpp_messages(
            "TOKEN_INVALID",
            "The access token is unknown or expired",
        ));
    }
    let consent_id = match header(&req, "consent-id") {
        Some(consent_id) => consent_id,
        None => {
            return HttpResponse::BadRequest()
                .json(tpp_messages("FORMAT_ERROR", "Consent-ID header is required"))
        }
    };
    match storage.read().unwrap().triodos_consents.get(&consent_id) {
        Some(triodos::ConsentStatus::Valid) => {}
        Some(_) => {
            return HttpResponse::Unauthorized().json(tpp_messages(
                "CONSENT_INVALID",
                "The consent has not been authorised",
            ))
        }
        None => {
            return HttpResponse::BadRequest()
                .json(tpp_messages("CONSENT_UNKNOWN", "Unknown consent"))
        }
    }

    let base = base_url(&req);
    let resource_id = Uuid::new_v4().to_string();
    let resource = format!(
        "{}/xs2a-bg/{}/v1/accounts/{}",
        base, configuration.tenant, resource_id
    );
    HttpResponse::Ok().json(json!({
        "accounts": [{
            "iban": configuration.account_iban,
            "currency": "EUR",
            "resourceId": resource_id,
            "cashAccountType": "CACC",
            "name": "Current Account",
            "status": "enabled",
            "_links": {
                "account": resource,
                "transactions": format!("{}/transactions", resource),
                "balances": format!("{}/balances", resource)
            }
        }]
    }))
}

// --- ABN AMRO ---

#[derive(serde::Deserialize)]
pub(super) struct AbnAmroTokenForm {
    pub client_id: String,
    pub grant_type: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// POST /as/token.oauth2
pub(super) async fn abn_token(
    configuration: web::Data<MockBankConfiguration>,
    form: web::Form<AbnAmroTokenForm>,
) -> HttpResponse {
    if form.client_id != configuration.client_id {
        return HttpResponse::BadRequest().json(gateway_errors(
            "ERR_3002_003",
            "The client id is unknown",
            "INVALID_CLIENT",
        ));
    }

    let granted = match form.grant_type.as_str() {
        "client_credentials" => true,
        "authorization_code" => form.code.is_some(),
        "refresh_token" => form.refresh_token.is_some(),
        _ => false,
    };
    if !granted {
        return HttpResponse::BadRequest().json(gateway_errors(
            "ERR_3002_004",
            "The grant could not be validated",
            "INVALID_GRANT",
        ));
    }

    let mut token = json!({
        "access_token": configuration.access_token,
        "token_type": "Bearer",
        "expires_in": 7200
    });
    if form.grant_type != "client_credentials" {
        token["refresh_token"] = json!(Uuid::new_v4().to_string());
    }
    HttpResponse::Ok().json(token)
}

fn abn_authorized(req: &HttpRequest, configuration: &MockBankConfiguration) -> Option<HttpResponse> {
    if header(req, "api-key").as_deref() != Some(configuration.api_key.as_str()) {
        return Some(HttpResponse::Forbidden().json(gateway_errors(
            "ERR_1001_001",
            "The API key is not valid for the requested service",
            "INVALID_API_KEY",
        )));
    }
    if bearer_token(req).as_deref() != Some(configuration.access_token.as_str()) {
        return Some(HttpResponse::Unauthorized().json(gateway_errors(
            "ERR_2002_004",
            "The presented access token is not valid or expired",
            "INVALID_ACCESS_TOKEN",
        )));
    }
    None
}

/// GET /v1/accounts/{account}/balances
pub(super) async fn abn_account_balances(
    req: HttpRequest,
    configuration: web::Data<MockBankConfiguration>,
    path: web::Path<String>,
) -> HttpResponse {
    if let Some(rejection) = abn_authorized(&req, &configuration) {
        return rejection;
    }

    HttpResponse::Ok().json(json!({
        "accountNumber": path.into_inner(),
        "currency": "EUR",
        "balanceType": "BOOKBALANCE",
        "amount": 42.42
    }))
}

/// POST /v1/payments
pub(super) async fn abn_register_payment(
    req: HttpRequest,
    configuration: web::Data<MockBankConfiguration>,
    storage: web::Data<MockBankStorage>,
    body: web::Json<abn_amro::SepaPaymentRequest>,
) -> HttpResponse {
    if let Some(rejection) = abn_authorized(&req, &configuration) {
        return rejection;
    }
    if body.currency.as_deref().unwrap_or("EUR") != "EUR" {
        return HttpResponse::BadRequest().json(gateway_errors(
            "ERR_1100_004",
            "Only EUR is accepted on SEPA payments",
            "BAD_REQUEST",
        ));
    }

    let transaction_id = Uuid::new_v4().to_string();
    let payment = abn_amro::SepaPayment {
        transaction_id: transaction_id.clone(),
        account_holder_name: MOCK_ACCOUNT_HOLDER.to_string(),
        account_number: body
            .initiatingparty_account_number
            .clone()
            .unwrap_or_else(|| configuration.account_iban.clone()),
        status: abn_amro::PaymentStatus::Stored,
    };
    let created = json!({
        "transactionId": payment.transaction_id,
        "status": payment.status,
        "accountNumber": payment.account_number
    });
    storage
        .write()
        .unwrap()
        .abn_payments
        .insert(transaction_id, payment);

    HttpResponse::Created().json(created)
}

/// GET /v1/payments/{id}
pub(super) async fn abn_get_payment(
    req: HttpRequest,
    configuration: web::Data<MockBankConfiguration>,
    storage: web::Data<MockBankStorage>,
    path: web::Path<String>,
) -> HttpResponse {
    if let Some(rejection) = abn_authorized(&req, &configuration) {
        return rejection;
    }
    let id = path.into_inner();

    storage.read().unwrap().abn_payments.get(&id).map_or_else(
        || {
            HttpResponse::NotFound().json(gateway_errors(
                "ERR_4001_001",
                "The payment is unknown",
                "NOT_FOUND",
            ))
        },
        |payment| HttpResponse::Ok().json(payment),
    )
}

/// PUT /v1/payments/{id}
///
/// The real gateway only executes payments the PSU authorized through the
/// consent flow first; the mock executes them right away.
pub(super) async fn abn_execute_payment(
    req: HttpRequest,
    configuration: web::Data<MockBankConfiguration>,
    storage: web::Data<MockBankStorage>,
    path: web::Path<String>,
) -> HttpResponse {
    if let Some(rejection) = abn_authorized(&req, &configuration) {
        return rejection;
    }
    let id = path.into_inner();

    let mut storage = storage.write().unwrap();
    match storage.abn_payments.get_mut(&id) {
        Some(payment) => {
            payment.status = abn_amro::PaymentStatus::Executed;
            HttpResponse::Ok().json(payment)
        }
        None => HttpResponse::NotFound().json(gateway_errors(
            "ERR_4001_001",
            "The payment is unknown",
            "NOT_FOUND",
        )),
    }
}

/// DELETE /v1/payments/{id}
pub(super) async fn abn_cancel_payment(
    req: HttpRequest,
    configuration: web::Data<MockBankConfiguration>,
    storage: web::Data<MockBankStorage>,
    path: web::Path<String>,
) -> HttpResponse {
    if let Some(rejection) = abn_authorized(&req, &configuration) {
        return rejection;
    }
    let id = path.into_inner();

    match storage.write().unwrap().abn_payments.remove(&id) {
        Some(_) => HttpResponse::Ok().finish(),
        None => HttpResponse::NotFound().json(gateway_errors(
            "ERR_4001_001",
            "The payment is unknown",
            "NOT_FOUND",
        )),
    }
}

// --- Rabobank ---

#[derive(serde::Deserialize)]
pub(super) struct RabobankTokenForm {
    pub grant_type: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// POST /openapi/sandbox/oauth2-premium/token
pub(super) async fn rabobank_token(
    req: HttpRequest,
    configuration: web::Data<MockBankConfiguration>,
    form: web::Form<RabobankTokenForm>,
) -> HttpResponse {
    // The token endpoint authenticates with basic auth, not a signature
    match basic_credentials(&req) {
        Some((client_id, client_secret))
            if client_id == configuration.client_id
                && client_secret == configuration.client_secret => {}
        _ => return HttpResponse::Unauthorized().json(json!({ "error": "invalid_client" })),
    }

    let granted = match form.grant_type.as_str() {
        "authorization_code" => form.code.is_some(),
        "refresh_token" => form.refresh_token.is_some(),
        _ => false,
    };
    if !granted {
        return HttpResponse::BadRequest().json(json!({ "error": "invalid_grant" }));
    }

    HttpResponse::Ok().json(json!({
        "token_type": "bearer",
        "access_token": configuration.access_token,
        "expires_in": 3600,
        "refresh_token": Uuid::new_v4().to_string(),
        "refresh_token_expires_in": 94_608_000u32,
        "scope": "bai.accountinformation.read",
        "consented_on": Utc::now().timestamp(),
        "metadata": format!("a:consentId {}", configuration.consent_id)
    }))
}

/// IBM API Connect error body, as the Rabobank gateway answers.
fn ibm_unauthorized(more_information: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({
        "httpCode": "401",
        "httpMessage": "Unauthorized",
        "moreInformation": more_information
    }))
}

/// GET /openapi/sandbox/oauth2-premium/v1/consents/{id}
///
/// Signed, but deliberately without a bearer: the signature alone
/// authenticates the TPP here.
pub(super) async fn rabobank_consent_details(
    req: HttpRequest,
    configuration: web::Data<MockBankConfiguration>,
    path: web::Path<String>,
) -> HttpResponse {
    if header(&req, "x-ibm-client-id").as_deref() != Some(configuration.client_id.as_str()) {
        return ibm_unauthorized("Client id is not registered");
    }
    let id = path.into_inner();
    if id != configuration.consent_id {
        return HttpResponse::NotFound().json(json!({
            "httpCode": "404",
            "httpMessage": "Not Found",
            "moreInformation": "Unknown consent"
        }));
    }

    HttpResponse::Ok().json(json!({
        "consentId": id,
        "scopes": "bai.accountinformation.read",
        "status": "ACTIVE"
    }))
}

/// GET /openapi/sandbox/payments/insight/accounts
pub(super) async fn rabobank_list_accounts(
    req: HttpRequest,
    configuration: web::Data<MockBankConfiguration>,
) -> HttpResponse {
    if header(&req, "x-ibm-client-id").as_deref() != Some(configuration.client_id.as_str()) {
        return ibm_unauthorized("Client id is not registered");
    }
    if bearer_token(&req).as_deref() != Some(configuration.access_token.as_str()) {
        return ibm_unauthorized("The access token is not valid or expired");
    }

    HttpResponse::Ok().json(json!({
        "accounts": [{
            "resourceId": Uuid::new_v4().to_string(),
            "iban": configuration.account_iban,
            "currency": "EUR",
            "status": "enabled",
            "ownerName": MOCK_ACCOUNT_HOLDER
        }]
    }))
}

/// GET /openapi/sandbox/payments/insight/accounts/{id}
pub(super) async fn rabobank_account_details(
    req: HttpRequest,
    configuration: web::Data<MockBankConfiguration>,
    path: web::Path<String>,
) -> HttpResponse {
    if header(&req, "x-ibm-client-id").as_deref() != Some(configuration.client_id.as_str()) {
        return ibm_unauthorized("Client id is not registered");
    }
    if bearer_token(&req).as_deref() != Some(configuration.access_token.as_str()) {
        return ibm_unauthorized("The access token is not valid or expired");
    }

    HttpResponse::Ok().json(json!({
        "resourceId": path.into_inner(),
        "iban": configuration.account_iban,
        "currency": "EUR",
        "status": "enabled",
        "ownerName": MOCK_ACCOUNT_HOLDER
    }))
}
