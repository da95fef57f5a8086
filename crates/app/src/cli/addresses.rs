use std::io::Write;

use clap::{Args, Subcommand, ValueEnum};
use foodwagon::{
    addresses::{AddressId, AddressLabel},
    location::Coordinates,
    validation::AddressForm,
};
use foodwagon_app::context::AppContext;

use super::{line, render};

#[derive(Debug, Args)]
pub(crate) struct AddressCommand {
    #[command(subcommand)]
    command: AddressSubcommand,
}

#[derive(Debug, Subcommand)]
enum AddressSubcommand {
    /// List saved addresses; the selected one is starred
    List,

    /// Save a new address and select it
    Add(AddArgs),

    /// Remove a saved address
    Remove(IdArgs),

    /// Deliver to a saved address
    Select(IdArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Label {
    Home,
    Work,
    Other,
}

impl From<Label> for AddressLabel {
    fn from(label: Label) -> Self {
        match label {
            Label::Home => AddressLabel::Home,
            Label::Work => AddressLabel::Work,
            Label::Other => AddressLabel::Other,
        }
    }
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Address kind
    #[arg(long, value_enum, default_value_t = Label::Home)]
    label: Label,

    /// Flat, house or floor
    #[arg(long, default_value = "")]
    flat_no: String,

    /// Area or locality; detected when --lat/--lon are given
    #[arg(long, default_value = "")]
    area: String,

    /// City; detected when --lat/--lon are given
    #[arg(long, default_value = "")]
    city: String,

    /// Latitude to detect city and area from
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude to detect city and area from
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,
}

#[derive(Debug, Args)]
struct IdArgs {
    /// Address ID
    id: String,
}

pub(crate) async fn run(
    command: AddressCommand,
    ctx: &mut AppContext,
    out: &mut dyn Write,
) -> Result<(), String> {
    match command.command {
        AddressSubcommand::List => list(ctx, out),
        AddressSubcommand::Add(args) => add(args, ctx, out).await,
        AddressSubcommand::Remove(args) => {
            let id = AddressId::from(args.id.as_str());

            let removed = ctx
                .storefront
                .addresses_mut()
                .remove_address(&id)
                .map_err(|error| format!("failed to remove address: {error}"))?;

            if removed {
                Ok(())
            } else {
                line(out, format_args!("no address with id {id}"))
            }
        }
        AddressSubcommand::Select(args) => {
            ctx.storefront
                .addresses_mut()
                .set_selected(&AddressId::from(args.id.as_str()))
                .map_err(|error| format!("failed to select address: {error}"))?;

            list(ctx, out)
        }
    }
}

fn list(ctx: &AppContext, out: &mut dyn Write) -> Result<(), String> {
    if ctx.storefront.addresses().addresses().is_empty() {
        return line(out, "no saved addresses");
    }

    line(out, render::addresses(ctx.storefront.addresses()))
}

async fn add(args: AddArgs, ctx: &mut AppContext, out: &mut dyn Write) -> Result<(), String> {
    let mut form = AddressForm {
        label: args.label.into(),
        flat_no: args.flat_no,
        area: args.area,
        city: args.city,
    };

    if let (Some(latitude), Some(longitude)) = (args.lat, args.lon) {
        let detected = ctx
            .location
            .detect_for_form(Ok(Coordinates {
                latitude,
                longitude,
            }))
            .await
            .map_err(|error| format!("failed to detect location: {error}"))?;

        if form.city.trim().is_empty() {
            form.city = detected.city;
        }

        if form.area.trim().is_empty() {
            form.area = detected.area;
        }
    }

    let address = form.validate().map_err(|errors| errors.to_string())?;

    let id = ctx
        .storefront
        .addresses_mut()
        .add_address(address)
        .map_err(|error| format!("failed to save address: {error}"))?;

    line(out, format_args!("saved address {id}"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use foodwagon::{
        location::GeocodedAddress,
        store::{KeyValueStore, MemoryStore},
    };
    use foodwagon_app::{
        api::{MockReverseGeocoder, MockStorefrontApi},
        context::AppContext,
    };
    use testresult::TestResult;

    use crate::cli::tests::{context, run};

    #[tokio::test]
    async fn add_select_and_remove() -> TestResult {
        let mut ctx = context(MockStorefrontApi::new());

        run(
            &mut ctx,
            &["address", "add", "--flat-no", "12A", "--area", "Koramangala", "--city", "Bangalore"],
        )
        .await?;
        run(
            &mut ctx,
            &[
                "address", "add", "--label", "work", "--flat-no", "4F", "--area", "Indiranagar",
                "--city", "Bangalore",
            ],
        )
        .await?;

        let book = ctx.storefront.addresses();
        let home = book.addresses().first().ok_or("no addresses")?.id.clone();

        assert_eq!(book.selected().map(|a| a.area.as_str()), Some("Indiranagar"));

        let printed = run(&mut ctx, &["address", "select", home.as_str()]).await?;

        assert!(printed.contains("12A, Koramangala, Bangalore"));
        assert_eq!(ctx.storefront.addresses().selected_id(), Some(&home));

        let printed = run(&mut ctx, &["address", "remove", home.as_str()]).await?;

        assert!(printed.contains("[info] Address removed successfully."));
        assert_eq!(
            ctx.storefront.addresses().selected().map(|a| a.area.as_str()),
            Some("Indiranagar")
        );

        Ok(())
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let mut ctx = context(MockStorefrontApi::new());

        let result = run(&mut ctx, &["address", "add", "--flat-no", "12A"]).await;

        assert!(result.is_err());
        assert!(ctx.storefront.addresses().addresses().is_empty());
    }

    #[tokio::test]
    async fn coordinates_fill_city_and_area() -> TestResult {
        let mut geocoder = MockReverseGeocoder::new();

        geocoder.expect_reverse().once().return_once(|_| {
            Ok(GeocodedAddress {
                town: Some("Mysuru".to_string()),
                suburb: Some("Gokulam".to_string()),
                ..GeocodedAddress::default()
            })
        });

        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut ctx = AppContext::new(store, Arc::new(MockStorefrontApi::new()), Arc::new(geocoder));

        run(
            &mut ctx,
            &["address", "add", "--flat-no", "22", "--lat", "12.33", "--lon", "76.63"],
        )
        .await?;

        let selected = ctx.storefront.addresses().selected().ok_or("nothing selected")?;

        assert_eq!(selected.display_line(), "22, Gokulam, Mysuru");

        Ok(())
    }
}
