use cartolink::config::{DeviceProfile, SdkConfig};
use cartolink::error::LocatorError;
use cartolink::locator::{
    format, is_first_party_http, parse, source_locator, style_locator, tile_locator,
    to_api_locator,
};

const API: &str = "https://api.example-mapservice.com";

fn config(token: Option<&str>) -> SdkConfig {
    SdkConfig {
        access_token: token.map(ToOwned::to_owned),
        ..SdkConfig::default()
    }
}

#[test]
fn well_formed_locators_survive_parse_and_format() {
    for locator in [
        "mapservice://styles/user/style",
        "https://api.example-mapservice.com/v4/a/{z}/{x}/{y}.png?style=x&access_token=pk.abc",
        "http://localhost:8080/tiles?a=1",
        "mapservice://fonts/user/{fontstack}/{range}.pbf",
    ] {
        assert_eq!(format(&parse(locator).unwrap()), locator);
    }
}

#[test]
fn first_party_http_matches_host_only() {
    let config = config(None);
    assert!(is_first_party_http(
        "https://api.example-mapservice.com/styles/v1/x",
        &config
    ));
    assert!(is_first_party_http("//sub.example-mapservice.com/x", &config));
    assert!(is_first_party_http("HTTPS://API.EXAMPLE-MAPSERVICE.CN/x", &config));
    assert!(!is_first_party_http("https://evil.com/example-mapservice.com", &config));
    assert!(!is_first_party_http("https://notexample-mapservice.com/x", &config));
}

#[test]
fn token_is_never_appended_when_not_required() {
    let config = SdkConfig {
        require_access_token: false,
        ..config(Some("pk.abc"))
    };
    let url = style_locator("mapservice://styles/a/b", None, &config).unwrap();
    assert_eq!(url, format!("{API}/styles/v1/a/b"));

    // The authority is replaced by the API origin, so only the path survives.
    let url = to_api_locator(parse("mapservice://styles/v1/a/b").unwrap(), None, &config).unwrap();
    assert_eq!(url, format!("{API}/v1/a/b"));
}

#[test]
fn secret_tokens_always_fail() {
    let required = config(Some("sk.secret"));
    let optional = SdkConfig {
        require_access_token: false,
        ..required.clone()
    };
    for config in [&required, &optional] {
        assert_eq!(
            style_locator("mapservice://styles/a/b", None, config),
            Err(LocatorError::SecretTokenUsed)
        );
    }
    assert_eq!(
        source_locator("mapservice://a.b", Some("s"), &config(Some("pk.abc"))),
        Err(LocatorError::SecretTokenUsed)
    );
}

#[test]
fn missing_token_fails_only_when_required() {
    assert_eq!(
        style_locator("mapservice://styles/a/b", None, &config(None)),
        Err(LocatorError::MissingToken)
    );
    assert_eq!(
        style_locator("https://tiles.example.org/style.json", None, &config(None)).unwrap(),
        "https://tiles.example.org/style.json"
    );
}

#[test]
fn low_density_tile_switches_to_webp() {
    let device = DeviceProfile {
        pixel_ratio: 1.0,
        supports_webp: true,
    };
    let url = tile_locator(
        &format!("{API}/v4/user.streets/1/2/3.png"),
        Some("mapservice://user.streets"),
        None,
        device,
        &config(Some("pk.abc")),
    )
    .unwrap();
    assert_eq!(url, format!("{API}/v4/user.streets/1/2/3.webp"));
}

#[test]
fn tile_size_512_selects_high_density_regardless_of_ratio() {
    let device = DeviceProfile {
        pixel_ratio: 1.0,
        supports_webp: true,
    };
    let url = tile_locator(
        &format!("{API}/v4/user.streets/1/2/3.png"),
        Some("mapservice://user.streets"),
        Some(512),
        device,
        &config(Some("pk.abc")),
    )
    .unwrap();
    assert_eq!(url, format!("{API}/v4/user.streets/1/2/3@2x.webp"));
}

#[test]
fn third_party_tiles_are_left_alone() {
    let tile = "https://tiles.example.org/1/2/3.png";
    let device = DeviceProfile {
        pixel_ratio: 3.0,
        supports_webp: true,
    };
    assert_eq!(
        tile_locator(tile, Some("https://tiles.example.org/tiles.json"), Some(512), device, &config(None))
            .unwrap(),
        tile
    );
}
