//! Weather command handler.
//!
//! Fetches the current weather and derives today's goal recommendation. The
//! adjustment is written to today's record only when the `weather_enabled`
//! setting is on; otherwise the recommendation is shown and nothing changes.

use log::debug;

use crate::{
    commands::{
        CommandContext, CommandResult,
        actions::achievements::unlock_achievements,
        markdown_response::{format_error, format_unlocked, format_weather},
    },
    reminders::Notifier,
    store::Store,
    weather::{WeatherRequester, recommendation},
};

/// Shows the weather recommendation and applies it when enabled.
pub async fn handle_weather<S, N, R>(context: &mut CommandContext<'_, S, N, R>) -> CommandResult
where
    S: Store,
    N: Notifier + Send + Sync + 'static,
    R: WeatherRequester,
{
    debug!("handling weather command");

    let settings = match context.store.get_settings().await {
        Ok(settings) => settings,
        Err(e) => return CommandResult::from(format_error(&e)),
    };

    let weather = context.weather.get_weather(false).await;
    let recommendation = recommendation(&weather, context.recorder.state().record.goal);
    debug!("weather recommendation: {:?}", recommendation);

    let mut unlocked = Vec::new();
    if settings.weather_enabled {
        if let Err(e) = context
            .recorder
            .update_weather_adjustment(recommendation.adjustment as i64)
            .await
        {
            return CommandResult::from(format_error(&e));
        }
        unlocked = unlock_achievements(context).await;
    }

    let mut response = format_weather(&recommendation, settings.weather_enabled);
    if context.weather.last_error().is_some() {
        response.push_str("\n⚠️ The weather could not be updated, the last known weather is used.");
    }
    if !unlocked.is_empty() {
        response.push('\n');
        response.push_str(&format_unlocked(&unlocked));
    }

    CommandResult { response, unlocked }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::actions::fixtures::TestServices,
        config::WeatherConfig,
        store::{SettingKey, SettingValue},
        weather::MockWeatherRequester,
    };

    #[tokio::test]
    async fn test_fallback_weather_adjusts_goal() {
        let mut services = TestServices::new().await;

        let result = handle_weather(&mut services.context()).await;

        assert!(result.response.contains("Beijing"));
        assert!(result.response.contains("Today's goal is now **9** cups."));
        assert_eq!(services.recorder.state().record.weather_adjustment, 1);
        assert_eq!(services.recorder.state().stats.adjusted_goal, 9);
    }

    #[tokio::test]
    async fn test_disabled_weather_keeps_goal() {
        let mut services = TestServices::new().await;
        services
            .store
            .update_setting(SettingKey::WeatherEnabled, SettingValue::Bool(false))
            .await
            .unwrap();

        let result = handle_weather(&mut services.context()).await;

        assert!(result.response.contains("your goal is unchanged"));
        assert_eq!(services.recorder.state().record.weather_adjustment, 0);
    }

    #[tokio::test]
    async fn test_failed_request_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/weather")
            .with_status(503)
            .create_async()
            .await;
        let error = reqwest::get(format!("{}/weather", server.url()))
            .await
            .unwrap()
            .error_for_status()
            .unwrap_err();

        let mut requester = MockWeatherRequester::new();
        requester
            .expect_current_weather()
            .return_once(move || Err(error));
        let config = WeatherConfig {
            api_key: "key".to_string(),
            ..Default::default()
        };
        let mut services = TestServices::with_weather(requester, config).await;

        let result = handle_weather(&mut services.context()).await;

        assert!(result.response.contains("Beijing"));
        assert!(result.response.contains("could not be updated"));
    }
}
