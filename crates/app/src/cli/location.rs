use std::io::Write;

use clap::Args;
use foodwagon::location::Coordinates;
use foodwagon_app::context::AppContext;

use super::line;

#[derive(Debug, Args)]
pub(crate) struct LocateArgs {
    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true, required_unless_present = "city")]
    lat: Option<f64>,

    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true, required_unless_present = "city")]
    lon: Option<f64>,

    /// Pick a city by hand instead of detecting one
    #[arg(long, conflicts_with_all = ["lat", "lon", "for_form"])]
    city: Option<String>,

    /// Print the city and area an address form would be filled with
    #[arg(long)]
    for_form: bool,
}

pub(crate) async fn run(
    args: LocateArgs,
    ctx: &mut AppContext,
    out: &mut dyn Write,
) -> Result<(), String> {
    if let Some(city) = args.city {
        ctx.storefront.location_mut().select_city(&city);

        return line(out, ctx.storefront.location().address());
    }

    let (Some(latitude), Some(longitude)) = (args.lat, args.lon) else {
        return Err("both --lat and --lon are required".to_string());
    };

    let position = Ok(Coordinates {
        latitude,
        longitude,
    });

    if args.for_form {
        let fill = ctx
            .location
            .detect_for_form(position)
            .await
            .map_err(|error| format!("failed to detect location: {error}"))?;

        line(out, format_args!("city: {}", fill.city))?;

        return line(out, format_args!("area: {}", fill.area));
    }

    ctx.location
        .detect(ctx.storefront.location_mut(), position)
        .await;

    let state = ctx.storefront.location();

    if let Some(error) = state.error() {
        return Err(format!("failed to detect location: {error}"));
    }

    line(out, format_args!("{} ({})", state.address(), state.city()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use foodwagon::{
        location::GeocodedAddress,
        store::{KeyValueStore, MemoryStore},
    };
    use foodwagon_app::{
        api::{GeocodingError, MockReverseGeocoder, MockStorefrontApi},
        context::AppContext,
    };
    use testresult::TestResult;

    use crate::cli::tests::{context, run};

    fn context_with(geocoder: MockReverseGeocoder) -> AppContext {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        AppContext::new(store, Arc::new(MockStorefrontApi::new()), Arc::new(geocoder))
    }

    #[tokio::test]
    async fn detected_area_and_city() -> TestResult {
        let mut geocoder = MockReverseGeocoder::new();
        geocoder.expect_reverse().once().return_once(|_| {
            Ok(GeocodedAddress {
                city: Some("Bengaluru".to_string()),
                suburb: Some("Koramangala".to_string()),
                ..GeocodedAddress::default()
            })
        });

        let mut ctx = context_with(geocoder);

        let printed = run(&mut ctx, &["locate", "--lat", "12.9352", "--lon", "77.6245"]).await?;

        assert_eq!(printed, "Koramangala, Bengaluru (Bengaluru)\n");
        assert_eq!(ctx.storefront.location().city(), "Bengaluru");

        Ok(())
    }

    #[tokio::test]
    async fn geocoder_failure_shows_coordinates() -> TestResult {
        let mut geocoder = MockReverseGeocoder::new();
        geocoder
            .expect_reverse()
            .once()
            .return_once(|_| Err(GeocodingError::UnexpectedResponse(503)));

        let mut ctx = context_with(geocoder);

        let printed = run(&mut ctx, &["locate", "--lat", "12.93453", "--lon", "77.62658"]).await?;

        assert_eq!(printed, "12.9345, 77.6266 (Current Location)\n");

        Ok(())
    }

    #[tokio::test]
    async fn form_fill_has_no_default_city() -> TestResult {
        let mut geocoder = MockReverseGeocoder::new();
        geocoder
            .expect_reverse()
            .once()
            .return_once(|_| Ok(GeocodedAddress::default()));

        let mut ctx = context_with(geocoder);

        let printed = run(
            &mut ctx,
            &["locate", "--lat", "0", "--lon", "0", "--for-form"],
        )
        .await?;

        assert_eq!(printed, "city: \narea: \n");
        assert_eq!(ctx.storefront.location().city(), "Bangalore");

        Ok(())
    }

    #[tokio::test]
    async fn manual_city() -> TestResult {
        let mut ctx = context(MockStorefrontApi::new());

        assert_eq!(run(&mut ctx, &["locate", "--city", "Mumbai"]).await?, "Mumbai, India\n");

        Ok(())
    }
}
