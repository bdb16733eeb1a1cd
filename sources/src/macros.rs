//! Define our own macro to simplify the code
//!

/// Call the HTTP client with the proper arguments
///
/// - anonymous GET with query parameters
/// - GET with query parameters and BASIC authentication
///
#[macro_export]
macro_rules! http_get {
    ($self:ident, $url:expr, $query:expr) => {
        $self
            .client
            .get($url)
            .header("user-agent", $crate::USER_AGENT)
            .query($query)
            .send()
    };
    ($self:ident, $url:expr, $query:expr, $user:expr, $pwd:expr) => {
        $self
            .client
            .get($url)
            .basic_auth($user, Some($pwd))
            .header("user-agent", $crate::USER_AGENT)
            .query($query)
            .send()
    };
}

/// Call the HTTP client with the proper arguments
///
/// - POST of a JSON document
///
#[macro_export]
macro_rules! http_post {
    ($self:ident, $url:expr, $data:expr) => {
        $self
            .client
            .post($url)
            .header("user-agent", $crate::USER_AGENT)
            .header("content-type", "application/json")
            .json($data)
            .send()
    };
}
