use reqwest::RequestBuilder;
use visualfabric_core::config::ServiceConfig;

/// Header that tells the hosting proxy to skip its browser warning page.
pub const PROXY_WARNING_HEADER: &str = "ngrok-skip-browser-warning";
pub const PROXY_WARNING_VALUE: &str = "69420";

pub(crate) const PROMPTS_ROUTE: &str = "/prompts/";
pub(crate) const GENERATE_MOCKUP_ROUTE: &str = "/generate_mockup/";

/// Adds the proxy bypass header when the config asks for it.
pub(crate) fn with_proxy_header(request: RequestBuilder, config: &ServiceConfig) -> RequestBuilder {
    if config.skip_proxy_warning {
        request.header(PROXY_WARNING_HEADER, PROXY_WARNING_VALUE)
    } else {
        request
    }
}
