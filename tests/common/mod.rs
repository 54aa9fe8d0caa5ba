
/// Redirect URI the test TPP registers and hands to the SCA flows.
pub static TEST_REDIRECT_URI: &str = "https://tpp.example.com/callback";
