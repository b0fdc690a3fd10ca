use super::SdkConfig;

impl SdkConfig {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("CARTOLINK_ACCESS_TOKEN")
            && !token.is_empty()
        {
            self.access_token = Some(token);
        }

        if let Ok(api_url) = std::env::var("CARTOLINK_API_URL")
            && !api_url.is_empty()
        {
            self.api_url = api_url;
        }

        if let Ok(events_url) = std::env::var("CARTOLINK_EVENTS_URL")
            && !events_url.is_empty()
        {
            self.telemetry.events_url = events_url;
        }

        if let Ok(flag) = std::env::var("CARTOLINK_REQUIRE_ACCESS_TOKEN")
            && let Ok(require) = flag.parse::<bool>()
        {
            self.require_access_token = require;
        }
    }
}
