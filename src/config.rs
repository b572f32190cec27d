use config::{Config, ConfigError, Environment};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue, ACCEPT, ACCEPT_LANGUAGE, HOST,
    USER_AGENT,
};
use serde::Deserialize;

/// Device/app/session identity sent with every request. The upstream ties
/// the catalog to one logged-in device; none of these values are refreshed
/// during a run.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub member_card: String,
    pub version: String,
    pub channel: String,
    pub display: String,
    pub app_version: String,
    pub bundle_identifier: String,
    pub locale: String,
    pub token: String,
    pub session_id: String,
    pub device_id: String,
    pub user_agent: String,
    pub ssid: String,
    pub device_model: String,
}

/// Defaults are a captured device session; any field can be overridden with
/// a `CP_`-prefixed environment variable.
pub fn load() -> Result<AppConfig, ConfigError> {
    Config::builder()
        .set_default("host", "mobile.cn-healthcare.com")?
        .set_default("member_card", "2f95e027dab448be8f1451185f0920d4")?
        .set_default("version", "12.1.2")?
        .set_default("channel", "zgjkj_1001")?
        .set_default("display", "414.000000x736.000000")?
        .set_default("app_version", "4600")?
        .set_default("bundle_identifier", "com.appstore.zgjkjiphone")?
        .set_default("locale", "zh-Hans-CN;q=1")?
        .set_default(
            "token",
            "Y9ZvscF__c8kMB3vh_.X5lCV4jeJFy6aJv2hXr.Top9fKpUJFfC1zhK3C3XLIZ0BkgJotNnZvQIoSSE7ondHkA==",
        )?
        .set_default("session_id", "1551403267295.531006")?
        .set_default("device_id", "7b67b83c960c92ad7e1b8e31e3a8522eaa45a303")?
        .set_default(
            "user_agent",
            "JianKangJie3/4.6.4 (iPhone; iOS 12.1.2; Scale/3.00)",
        )?
        .set_default("ssid", "42eb07768c97503e6e456ee50122e4fb")?
        .set_default("device_model", "iPhone9,2")?
        .add_source(Environment::with_prefix("CP"))
        .build()?
        .try_deserialize()
}

impl AppConfig {
    pub fn headers(&self) -> Result<HeaderMap, InvalidHeaderValue> {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_str(&self.host)?);
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&self.locale)?);
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.user_agent)?);
        headers.insert(
            HeaderName::from_static("memcard"),
            HeaderValue::from_str(&self.member_card)?,
        );
        headers.insert(
            HeaderName::from_static("version"),
            HeaderValue::from_str(&self.version)?,
        );
        headers.insert(
            HeaderName::from_static("channel"),
            HeaderValue::from_str(&self.channel)?,
        );
        headers.insert(
            HeaderName::from_static("display"),
            HeaderValue::from_str(&self.display)?,
        );
        headers.insert(
            HeaderName::from_static("appversion"),
            HeaderValue::from_str(&self.app_version)?,
        );
        headers.insert(
            HeaderName::from_static("appbundleidentifier"),
            HeaderValue::from_str(&self.bundle_identifier)?,
        );
        headers.insert(
            HeaderName::from_static("token"),
            HeaderValue::from_str(&self.token)?,
        );
        headers.insert(
            HeaderName::from_static("sid"),
            HeaderValue::from_str(&self.session_id)?,
        );
        headers.insert(
            HeaderName::from_static("id"),
            HeaderValue::from_str(&self.device_id)?,
        );
        headers.insert(
            HeaderName::from_static("ssid"),
            HeaderValue::from_str(&self.ssid)?,
        );
        headers.insert(
            HeaderName::from_static("model"),
            HeaderValue::from_str(&self.device_model)?,
        );
        Ok(headers)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_cover_every_field() {
        let config = load().unwrap();
        assert_eq!(config.host, "mobile.cn-healthcare.com");
        assert_eq!(config.device_model, "iPhone9,2");
        assert_eq!(config.session_id, "1551403267295.531006");
    }

    #[test]
    fn default_headers_are_valid() {
        let headers = load().unwrap().headers().unwrap();
        assert_eq!(headers.get("memcard").unwrap(), "2f95e027dab448be8f1451185f0920d4");
        assert_eq!(headers.get("model").unwrap(), "iPhone9,2");
        assert_eq!(headers.get(ACCEPT).unwrap(), "*/*");
    }
}
