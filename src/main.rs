//! `valuerdesk`: terminal client for the valuation platform.
//!
//! Thin presentation layer over the session store and HTTP client: each
//! subcommand collects its inputs, invokes one operation, and prints the
//! formatted response.

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use valuerdesk::net::error::ApiError;
use valuerdesk::net::http::HttpClient;
use valuerdesk::net::notify::{Notifier, StderrNotifier};
use valuerdesk::net::types::{NewRegistration, ProfileUpdate};
use valuerdesk::session::credentials::FileCredentialStore;
use valuerdesk::session::guard::{self, RouteGate};
use valuerdesk::session::store::{Navigator, SessionError, SessionStore};
use valuerdesk::views::location::InvalidCoordinates;
use valuerdesk::views::{dashboard, location, profile};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("request failed: {0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    Coordinates(#[from] InvalidCoordinates),
    #[error("not signed in; run `valuerdesk login` first")]
    NotSignedIn,
}

#[derive(Parser, Debug)]
#[command(
    name = "valuerdesk",
    about = "Valuation-platform client: auth, profile, dashboard, and location tools"
)]
struct Cli {
    /// Backend API base URL.
    #[arg(long, env = "VALUERDESK_BASE_URL", default_value = "http://127.0.0.1:8000/api")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and persist the session credential.
    Login {
        email: String,
        #[arg(long, env = "VALUERDESK_PASSWORD")]
        password: String,
    },
    /// Create an account and sign in.
    Register(RegisterArgs),
    /// Discard the stored credential.
    Logout,
    /// Fetch and show the signed-in profile.
    Whoami,
    /// Confirm an email address with a verification token.
    VerifyEmail { token: String },
    /// Ask the backend to send a fresh verification email.
    ResendVerification,
    /// Show the dashboard summary.
    Dashboard,
    /// Profile display and updates.
    Profile(ProfileCommand),
    /// Location intelligence tools.
    Location(LocationCommand),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    email: String,
    #[arg(long, env = "VALUERDESK_PASSWORD")]
    password: String,
    #[arg(long)]
    full_name: String,
    #[arg(long)]
    honorable: Option<String>,
    #[arg(long)]
    professional_title: Option<String>,
    #[arg(long)]
    ivsl_registration: Option<String>,
    #[arg(long)]
    ivsl_membership: Option<String>,
    #[arg(long)]
    professional_status: Option<String>,
    /// Repeatable; qualifications are kept in the order given.
    #[arg(long = "qualification")]
    qualifications: Vec<String>,
    #[arg(long)]
    contact_number: Option<String>,
    #[arg(long)]
    mobile_number: Option<String>,
    #[arg(long)]
    address_city: Option<String>,
    #[arg(long)]
    address_district: Option<String>,
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    /// Show the current profile.
    Show,
    /// Update profile fields; omitted flags are left unchanged.
    Update(ProfileUpdateArgs),
    /// Manage the qualifications list.
    Qualification(QualificationCommand),
}

#[derive(Args, Debug)]
struct ProfileUpdateArgs {
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    honorable: Option<String>,
    #[arg(long)]
    professional_title: Option<String>,
    #[arg(long)]
    ivsl_registration: Option<String>,
    #[arg(long)]
    ivsl_membership: Option<String>,
    #[arg(long)]
    professional_status: Option<String>,
    #[arg(long)]
    contact_number: Option<String>,
    #[arg(long)]
    mobile_number: Option<String>,
    #[arg(long)]
    address_city: Option<String>,
    #[arg(long)]
    address_district: Option<String>,
}

#[derive(Args, Debug)]
struct QualificationCommand {
    #[command(subcommand)]
    command: QualificationSubcommand,
}

#[derive(Subcommand, Debug)]
enum QualificationSubcommand {
    /// Add a qualification to the end of the list.
    Add { qualification: String },
    /// Remove the qualification at a list index.
    Remove { index: usize },
}

#[derive(Args, Debug)]
struct LocationCommand {
    #[command(subcommand)]
    command: LocationSubcommand,
}

#[derive(Subcommand, Debug)]
enum LocationSubcommand {
    /// Resolve an address to coordinates.
    Geocode { address: String },
    /// Resolve coordinates to an address.
    ReverseGeocode { latitude: f64, longitude: f64 },
    /// Find amenities around a point.
    Amenities {
        latitude: f64,
        longitude: f64,
        /// Search radius in meters.
        #[arg(long, default_value_t = location::DEFAULT_AMENITY_RADIUS_M)]
        radius: u32,
    },
    /// Generate static and interactive map links for a point.
    Map {
        latitude: f64,
        longitude: f64,
        #[arg(long, default_value_t = location::DEFAULT_MAP_ZOOM)]
        zoom: u8,
        /// Pixel dimensions as WIDTHxHEIGHT.
        #[arg(long, default_value = location::DEFAULT_MAP_SIZE)]
        size: String,
        /// roadmap, satellite, hybrid, or terrain.
        #[arg(long, default_value = location::DEFAULT_MAP_TYPE)]
        maptype: String,
    },
}

/// Login-redirect seam for a terminal session: there is no view to swap,
/// so the redirect becomes an instruction.
struct CliNavigator;

impl Navigator for CliNavigator {
    fn to_login(&self) {
        eprintln!("Session expired. Run `valuerdesk login` to sign in again.");
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let notifier: Arc<dyn Notifier> = Arc::new(StderrNotifier);
    let client = Arc::new(HttpClient::new(&cli.base_url, notifier)?);
    let credentials = Arc::new(FileCredentialStore::new(FileCredentialStore::default_path()));
    let store = SessionStore::new(Arc::clone(&client), credentials, Arc::new(CliNavigator));

    match cli.command {
        Command::Login { email, password } => run_login(&store, &email, &password).await,
        Command::Register(args) => run_register(&store, args).await,
        Command::Logout => {
            store.logout();
            println!("Signed out.");
            Ok(())
        }
        Command::Whoami => run_whoami(&store).await,
        Command::VerifyEmail { token } => run_verify_email(&store, &token).await,
        Command::ResendVerification => run_resend_verification(&store).await,
        Command::Dashboard => run_dashboard(&client, &store).await,
        Command::Profile(args) => run_profile(&client, &store, args).await,
        Command::Location(args) => run_location(&client, &store, args).await,
    }
}

/// Bootstrap the session and gate on it the way protected views do.
async fn require_session(store: &SessionStore) -> Result<(), CliError> {
    store.bootstrap().await;
    match guard::route_gate(&store.snapshot()) {
        RouteGate::Render => Ok(()),
        RouteGate::Pending | RouteGate::RedirectToLogin => Err(CliError::NotSignedIn),
    }
}

fn print_verification_notice() {
    println!("Email verification required. Check your inbox, or run `valuerdesk resend-verification`.");
}

async fn run_login(store: &SessionStore, email: &str, password: &str) -> Result<(), CliError> {
    let outcome = store.login(email, password).await?;
    println!("Signed in as {}", outcome.user.full_name);
    if outcome.requires_verification {
        print_verification_notice();
    }
    Ok(())
}

async fn run_register(store: &SessionStore, args: RegisterArgs) -> Result<(), CliError> {
    let registration = NewRegistration {
        email: args.email,
        password: args.password,
        full_name: args.full_name,
        honorable: args.honorable,
        professional_title: args.professional_title,
        ivsl_registration: args.ivsl_registration,
        ivsl_membership: args.ivsl_membership,
        professional_status: args.professional_status,
        qualifications: args.qualifications,
        contact_number: args.contact_number,
        mobile_number: args.mobile_number,
        address_city: args.address_city,
        address_district: args.address_district,
    };
    let outcome = store.register(&registration).await?;
    println!("Registered {}", outcome.user.full_name);
    if outcome.requires_verification {
        print_verification_notice();
    }
    Ok(())
}

async fn run_whoami(store: &SessionStore) -> Result<(), CliError> {
    require_session(store).await?;
    let user = store.refresh_user_data().await?;
    print!("{}", profile::render(&user));
    Ok(())
}

async fn run_verify_email(store: &SessionStore, token: &str) -> Result<(), CliError> {
    // Verification links work logged out too; bootstrap only to attach a
    // credential when one is stored.
    store.bootstrap().await;
    let message = store.verify_email(token).await?;
    println!("{message}");
    Ok(())
}

async fn run_resend_verification(store: &SessionStore) -> Result<(), CliError> {
    require_session(store).await?;
    let message = store.resend_verification().await?;
    println!("{message}");
    Ok(())
}

async fn run_dashboard(client: &HttpClient, store: &SessionStore) -> Result<(), CliError> {
    require_session(store).await?;
    let token = store.current_token();
    let data = dashboard::load(client, token.as_deref()).await?;
    let snapshot = store.snapshot();
    print!("{}", dashboard::render(snapshot.user.as_ref(), &data));
    Ok(())
}

async fn run_profile(client: &HttpClient, store: &SessionStore, args: ProfileCommand) -> Result<(), CliError> {
    require_session(store).await?;
    let token = store.current_token();

    match args.command {
        ProfileSubcommand::Show => {
            if let Some(user) = store.snapshot().user.as_ref() {
                print!("{}", profile::render(user));
            }
            Ok(())
        }
        ProfileSubcommand::Update(update) => {
            let update = ProfileUpdate {
                full_name: update.full_name,
                honorable: update.honorable,
                professional_title: update.professional_title,
                ivsl_registration: update.ivsl_registration,
                ivsl_membership: update.ivsl_membership,
                professional_status: update.professional_status,
                contact_number: update.contact_number,
                mobile_number: update.mobile_number,
                address_city: update.address_city,
                address_district: update.address_district,
            };
            let user = store.update_profile(&update).await?;
            print!("{}", profile::render(&user));
            Ok(())
        }
        ProfileSubcommand::Qualification(qualification) => match qualification.command {
            QualificationSubcommand::Add { qualification } => {
                let list = profile::add_qualification(client, token.as_deref(), &qualification).await?;
                print!("{}", profile::render_qualifications(&list));
                Ok(())
            }
            QualificationSubcommand::Remove { index } => {
                let list = profile::remove_qualification(client, token.as_deref(), index).await?;
                print!("{}", profile::render_qualifications(&list));
                Ok(())
            }
        },
    }
}

async fn run_location(client: &HttpClient, store: &SessionStore, args: LocationCommand) -> Result<(), CliError> {
    require_session(store).await?;
    let token = store.current_token();

    match args.command {
        LocationSubcommand::Geocode { address } => {
            let response = location::geocode(client, token.as_deref(), &address).await?;
            print!("{}", location::render_geocode(&response));
            Ok(())
        }
        LocationSubcommand::ReverseGeocode { latitude, longitude } => {
            location::validate_coordinates(latitude, longitude)?;
            let response = location::reverse_geocode(client, token.as_deref(), latitude, longitude).await?;
            print!("{}", location::render_reverse_geocode(&response));
            Ok(())
        }
        LocationSubcommand::Amenities {
            latitude,
            longitude,
            radius,
        } => {
            location::validate_coordinates(latitude, longitude)?;
            let response = location::find_amenities(client, token.as_deref(), latitude, longitude, radius).await?;
            print!("{}", location::render_amenities(&response));
            Ok(())
        }
        LocationSubcommand::Map {
            latitude,
            longitude,
            zoom,
            size,
            maptype,
        } => {
            location::validate_coordinates(latitude, longitude)?;
            let response =
                location::generate_map(client, token.as_deref(), latitude, longitude, zoom, &size, &maptype).await?;
            print!("{}", location::render_map(&response));
            Ok(())
        }
    }
}
