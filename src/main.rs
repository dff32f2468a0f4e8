//! Orelax CLI
//!
//! Command-line interface for the marketplace demo:
//! - Browse and search the catalog
//! - Book stays, price checkouts, pay and cancel
//! - Buy sale listings
//! - Chat with owners
//! - Manage the account and the local store

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use orelax::config::{generate_default_config, Config};
use orelax::format::{format_price, format_price_buy, format_price_with_discount, period_suffix};
use orelax::model::{Property, PropertyKind, RentType, User};
use orelax::store::{keys, FileBackend, RecordStore};
use orelax::{account, booking, catalog, chat, map, seed};

#[derive(Parser)]
#[command(name = "orelax")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Local real-estate marketplace demo")]
#[command(
    long_about = "Orelax is a local-first real-estate marketplace demo.\nBrowse rentals and sales, book stays, and chat with owners - all against a local record store."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (default: per-user data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show featured listings
    Featured,

    /// Search the catalog
    Search {
        /// Listing kind (rent, buy)
        #[arg(short, long, default_value = "rent")]
        kind: PropertyKind,
        /// Exact city name
        #[arg(short, long)]
        city: Option<String>,
        /// Substring matched against address and city
        #[arg(short, long)]
        location: Option<String>,
        /// Minimum number of bedrooms
        #[arg(long)]
        min_beds: Option<u32>,
        /// Minimum number of bathrooms
        #[arg(long)]
        min_baths: Option<u32>,
        /// Minimum floor area (m2)
        #[arg(long)]
        min_area: Option<u32>,
    },

    /// Show one listing in full
    Show {
        /// Listing id
        id: String,
    },

    /// Show listings as map markers
    Map {
        /// Listing kind (rent, buy)
        #[arg(short, long, default_value = "rent")]
        kind: PropertyKind,
    },

    /// Book a stay at a rental listing
    Book {
        /// Listing id
        property_id: String,
        /// Stay date (YYYY-MM-DD)
        date: String,
        /// Number of adults
        #[arg(short, long, default_value = "1")]
        adults: u32,
        /// Pricing mode (monthly, daily)
        #[arg(short, long, default_value = "monthly")]
        rent_type: RentType,
    },

    /// Price the checkout for a booking
    Checkout {
        /// Booking id
        booking_id: String,
        /// Switch the pricing mode before quoting (monthly, daily)
        #[arg(short, long)]
        rent_type: Option<RentType>,
    },

    /// Pay for a booking
    Pay {
        /// Booking id
        booking_id: String,
    },

    /// Cancel a booking
    Cancel {
        /// Booking id
        booking_id: String,
    },

    /// Buy a sale listing
    Buy {
        /// Listing id
        property_id: String,
    },

    /// List the current user's bookings and purchases
    Trips,

    /// List chat threads
    Chats,

    /// Show one chat thread
    Chat {
        /// Chat id
        chat_id: String,
    },

    /// Send a chat message
    Send {
        /// Chat id
        chat_id: String,
        /// Message text
        text: String,
    },

    /// Show the current account
    Profile,

    /// Create an account
    Register {
        name: String,
        email: String,
        password: String,
    },

    /// Log in with an email
    Login {
        email: String,
    },

    /// Log out
    Logout,

    /// Submit a rental listing
    Add {
        /// Listing title
        title: String,
        /// Full address (leading component becomes the city)
        address: String,
        /// Monthly rent in rubles
        price: i64,
        /// Daily rent in rubles
        #[arg(long)]
        price_daily: Option<i64>,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Bedrooms
        #[arg(long, default_value = "1")]
        beds: u32,
        /// Bathrooms
        #[arg(long, default_value = "1")]
        baths: u32,
        /// Floor area (m2)
        #[arg(long, default_value = "30")]
        area: u32,
    },

    /// Export all records as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "orelax=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config::load_default();
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.store.data_dir));

    let backend = FileBackend::open(&data_dir)
        .with_context(|| format!("failed to open data directory {data_dir:?}"))?;
    let mut store = RecordStore::new(backend);
    seed::ensure_seeded(&mut store);

    match cli.command {
        Commands::Featured => {
            let listings = catalog::featured(&store);
            print_listing_table(&listings);
        }

        Commands::Search {
            kind,
            city,
            location,
            min_beds,
            min_baths,
            min_area,
        } => {
            let filter = catalog::SearchFilter {
                kind,
                city,
                location,
                min_beds,
                min_baths,
                min_area_m2: min_area,
            };
            let listings = catalog::search(&store, &filter);
            if listings.is_empty() {
                println!("No listings match the filter.");
            } else {
                print_listing_table(&listings);
            }
        }

        Commands::Show { id } => {
            let listing = catalog::property(&store, &id)?;
            print_listing(&listing);
        }

        Commands::Map { kind } => {
            let filter = catalog::SearchFilter::new(kind);
            let listings = catalog::search(&store, &filter);
            let groups = map::marker_groups(&listings);

            let points: Vec<_> = listings.iter().filter_map(|p| p.geo()).collect();
            let mut viewport = map::Viewport::default();
            viewport.fit(&points);

            println!(
                "Center: {:.4}, {:.4}  zoom {:.2}",
                viewport.center().lat,
                viewport.center().lng,
                viewport.zoom()
            );
            println!();
            println!("{:<8} {:<8} {:<8} {}", "Top %", "Left %", "Count", "Listings");
            println!("{}", "-".repeat(60));

            for group in &groups {
                let pos = viewport.marker_position(group.point);
                let titles: Vec<&str> =
                    group.properties.iter().map(|p| p.title.as_str()).collect();
                println!(
                    "{:<8.1} {:<8.1} {:<8} {}",
                    pos.top,
                    pos.left,
                    group.properties.len(),
                    titles.join(", ")
                );
            }
        }

        Commands::Book {
            property_id,
            date,
            adults,
            rent_type,
        } => {
            let booking =
                booking::create_booking(&mut store, &property_id, &date, adults, rent_type)?;
            println!("Booked listing {} for {}", booking.property_id, booking.date);
            println!("Booking id: {}", booking.id);
        }

        Commands::Checkout {
            booking_id,
            rent_type,
        } => {
            if let Some(rent_type) = rent_type {
                booking::set_rent_type(&mut store, &booking_id, rent_type)?;
            }

            let quote = booking::checkout_quote(&store, &booking_id)?;
            let suffix = period_suffix(quote.rent_type);
            println!("Rate:     {}{}", format_price(quote.base), suffix);
            println!(
                "Discount: -{} ({}%)",
                format_price(quote.discount),
                booking::DISCOUNT_PERCENT
            );
            println!("Total:    {}", format_price(quote.total));
        }

        Commands::Pay { booking_id } => {
            let booking = booking::confirm_booking(&mut store, &booking_id)?;
            println!("Booking {} is now {}", booking.id, booking.status);
        }

        Commands::Cancel { booking_id } => {
            let booking = booking::cancel_booking(&mut store, &booking_id)?;
            println!("Booking {} is now {}", booking.id, booking.status);
        }

        Commands::Buy { property_id } => {
            let purchase = booking::create_purchase(&mut store, &property_id)?;
            println!(
                "Purchased listing {} for {}",
                purchase.property_id,
                format_price_buy(purchase.price)
            );
            println!("Purchase id: {}", purchase.id);
        }

        Commands::Trips => {
            let user = account::current_or_default(&mut store);

            let bookings = booking::bookings_for(&store, &user.id);
            if bookings.is_empty() {
                println!("No bookings yet.");
            } else {
                println!("{:<20} {:<10} {:<12} {:<8} {}", "Id", "Listing", "Date", "Adults", "Status");
                println!("{}", "-".repeat(64));
                for b in &bookings {
                    println!(
                        "{:<20} {:<10} {:<12} {:<8} {}",
                        b.id, b.property_id, b.date, b.adults, b.status
                    );
                }
            }

            let purchases = booking::purchases_for(&store, &user.id);
            if !purchases.is_empty() {
                println!();
                println!("{:<20} {:<10} {:<14} {}", "Id", "Listing", "Price", "Status");
                println!("{}", "-".repeat(56));
                for p in &purchases {
                    println!(
                        "{:<20} {:<10} {:<14} {}",
                        p.id,
                        p.property_id,
                        format_price_buy(p.price),
                        p.status
                    );
                }
            }
        }

        Commands::Chats => {
            let threads = chat::threads(&store);
            if threads.is_empty() {
                println!("No chats yet.");
            } else {
                println!("{:<6} {:<20} {}", "Id", "With", "Last message");
                println!("{}", "-".repeat(60));
                for thread in &threads {
                    let name = chat::counterparty(&store, thread)
                        .map(|u| u.name)
                        .unwrap_or_else(|| "(unknown)".to_string());
                    let last = thread
                        .last_message()
                        .map(|m| m.text.as_str())
                        .unwrap_or("-");
                    println!("{:<6} {:<20} {}", thread.id, name, last);
                }
            }
        }

        Commands::Chat { chat_id } => {
            let thread = chat::thread(&store, &chat_id)?;
            let me = account::current_or_default(&mut store);
            for message in &thread.messages {
                let who = if message.sender_id == me.id {
                    "me"
                } else {
                    "them"
                };
                println!("[{}] {}: {}", message.timestamp, who, message.text);
            }
        }

        Commands::Send { chat_id, text } => {
            let message = chat::send_message(&mut store, &chat_id, &text)?;
            println!("Sent message {}", message.id);
        }

        Commands::Profile => match account::current_user(&store) {
            Some(user) => {
                println!("Name:  {}", user.name);
                println!("Email: {}", user.email);
                println!(
                    "Session: {}",
                    if account::is_logged_in(&store) {
                        "logged in"
                    } else {
                        "logged out"
                    }
                );
            }
            None => println!("No account yet. Use `orelax register` to create one."),
        },

        Commands::Register {
            name,
            email,
            password,
        } => {
            let user = account::register(&mut store, &name, &email, &password, &password)?;
            println!("Welcome, {}!", user.name);
        }

        Commands::Login { email } => {
            let user = account::login(&mut store, &email)?;
            println!("Logged in as {}", user.name);
        }

        Commands::Logout => {
            account::logout(&mut store);
            println!("Logged out.");
        }

        Commands::Add {
            title,
            address,
            price,
            price_daily,
            description,
            beds,
            baths,
            area,
        } => {
            let draft = catalog::PropertyDraft {
                title,
                description,
                address,
                price,
                price_daily,
                beds,
                baths,
                area_m2: area,
                images: Vec::new(),
            };
            let listing = catalog::add_property(&mut store, draft)?;
            println!("Added listing {} in {}", listing.id, listing.city);
        }

        Commands::Export { output } => {
            let collection =
                |key: &str| store.get::<serde_json::Value>(key, serde_json::json!([]));
            let dump = serde_json::json!({
                "user": store.get::<Option<User>>(keys::USER, None),
                "users": collection(keys::USERS),
                "properties": collection(keys::PROPERTIES),
                "bookings": collection(keys::BOOKINGS),
                "purchases": collection(keys::PURCHASES),
                "chats": collection(keys::CHATS),
            });
            let rendered = serde_json::to_string_pretty(&dump)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    println!("Exported to {:?}", path);
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn price_label(listing: &Property) -> String {
    match listing.kind {
        PropertyKind::Rent => format!(
            "{}{}",
            format_price(listing.price),
            period_suffix(RentType::Monthly)
        ),
        PropertyKind::Buy => format_price_buy(listing.buy_price()),
    }
}

fn print_listing_table(listings: &[Property]) {
    println!(
        "{:<4} {:<28} {:<18} {:<6} {:<6} {}",
        "Id", "Title", "City", "Beds", "m2", "Price"
    );
    println!("{}", "-".repeat(82));

    for listing in listings {
        println!(
            "{:<4} {:<28} {:<18} {:<6} {:<6} {}",
            listing.id,
            listing.title,
            listing.city,
            listing.beds,
            listing.area_m2,
            price_label(listing)
        );
    }
}

fn print_listing(listing: &Property) {
    println!("{} ({})", listing.title, listing.kind);
    println!("{}", listing.address);
    if let Some(metro) = &listing.metro {
        println!("Metro: {}", metro);
    }
    println!();
    println!("Price: {}", price_label(listing));
    if listing.kind == PropertyKind::Rent {
        println!(
            "Daily: {}{}",
            format_price(listing.daily_price()),
            period_suffix(RentType::Daily)
        );
        println!(
            "With checkout discount: {}",
            format_price_with_discount(listing.price, booking::DISCOUNT_PERCENT)
        );
    }
    println!();
    println!(
        "{} bed / {} bath / {} m2",
        listing.beds, listing.baths, listing.area_m2
    );
    if !listing.facilities.is_empty() {
        println!("Facilities: {}", listing.facilities.join(", "));
    }
    if !listing.description.is_empty() {
        println!();
        println!("{}", listing.description);
    }
}
