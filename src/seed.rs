//! Seed data and the versioned migration loader
//!
//! The app ships with built-in users, listings and chat threads. A single
//! guarded routine, [`ensure_seeded`], populates (or refreshes) them at
//! session start: bumping [`SEED_VERSION`] pushes new seed content to
//! existing installs on their next launch.
//!
//! Refresh policy: users, properties and chats are overwritten wholesale;
//! an existing acting-user record and a non-empty bookings collection are
//! preserved untouched.

use crate::model::{Booking, Chat, Message, Property, PropertyKind, User};
use crate::store::{keys, RecordStore};

/// Monotonic seed-content version. Bump to reseed existing installs.
pub const SEED_VERSION: u32 = 5;

/// Populate default data once per install, or again after a version bump.
/// Idempotent within a session; safe to call from any entry point.
pub fn ensure_seeded(store: &mut RecordStore) {
    let version: u32 = store.get(keys::DATA_VERSION, 0);
    let initialized: bool = store.get(keys::INITIALIZED, false);

    if initialized && version == SEED_VERSION {
        return;
    }

    tracing::info!("Seeding data (version {version} -> {SEED_VERSION})");

    let users = seed_users();

    // Keep the acting user if one already exists
    let current: Option<User> = store.get(keys::USER, None);
    if current.is_none() {
        store.set(keys::USER, &users[0]);
    }

    store.set(keys::USERS, &users);
    store.set(keys::PROPERTIES, &seed_properties());
    store.set(keys::CHATS, &seed_chats());

    // Bookings survive a reseed; only an absent collection is initialized
    let bookings: Vec<Booking> = store.get(keys::BOOKINGS, Vec::new());
    if bookings.is_empty() {
        store.set(keys::BOOKINGS, &Vec::<Booking>::new());
    }

    store.set(keys::INITIALIZED, &true);
    store.set(keys::DATA_VERSION, &SEED_VERSION);
}

/// Built-in accounts; index 0 is the default acting user
pub fn seed_users() -> Vec<User> {
    vec![
        user("1", "Саиф Уддин", "orbix.design@mail.com"),
        user("2", "Бесси Купер", "bessie.cooper@mail.com"),
        user("3", "Аннетт Блэк", "annette.black@mail.com"),
        user("4", "Дарья Соколова", "d.sokolova@mail.com"),
    ]
}

/// Built-in listings across Russian cities, with coordinates and metro labels
pub fn seed_properties() -> Vec<Property> {
    vec![
        rent(
            "1",
            "2-комн. кв. · 65 м² · 3/9 этаж",
            "Светлая квартира с видом на центр, рядом парк и школа.",
            "ул. Тверская, д. 15",
            "Москва",
            85_000,
            2,
            1,
            65,
            55.7601,
            37.6049,
        )
        .metro("Тверская")
        .daily(3_500)
        .featured()
        .images(&["🏢", "🛋️", "🛏️"])
        .facilities(&["Wi-Fi", "Кондиционер", "Парковка", "Лифт"]),
        rent(
            "2",
            "1-комн. кв. · 38 м² · 7/12 этаж",
            "Уютная студия после ремонта, вся мебель и техника новые.",
            "Ленинградский просп., д. 33",
            "Москва",
            55_000,
            1,
            1,
            38,
            55.7886,
            37.5585,
        )
        .metro("Динамо")
        .daily(2_200)
        .images(&["🏠", "🍳"])
        .facilities(&["Wi-Fi", "Стиральная машина"]),
        rent(
            "3",
            "3-комн. кв. · 92 м² · 5/5 этаж",
            "Просторная квартира в сталинском доме, потолки 3,2 м.",
            "Кутузовский просп., д. 8",
            "Москва",
            140_000,
            3,
            2,
            92,
            55.7446,
            37.5651,
        )
        .metro("Киевская")
        .featured()
        .images(&["🏛️", "🛋️", "🛏️", "🚿"])
        .facilities(&["Wi-Fi", "Посудомоечная машина", "Консьерж", "Парковка"]),
        rent(
            "4",
            "2-комн. кв. · 54 м² · 9/16 этаж",
            "Вид на Неву, десять минут пешком до метро.",
            "Невский просп., д. 88",
            "Санкт-Петербург",
            62_000,
            2,
            1,
            54,
            59.9320,
            30.3609,
        )
        .metro("Маяковская")
        .daily(2_800)
        .featured()
        .images(&["🏢", "🌊"])
        .facilities(&["Wi-Fi", "Балкон"]),
        rent(
            "5",
            "Студия · 28 м² · 2/9 этаж",
            "Компактная студия рядом с университетом.",
            "ул. Баумана, д. 19",
            "Казань",
            28_000,
            1,
            1,
            28,
            55.7879,
            49.1233,
        )
        .metro("Площадь Тукая")
        .daily(1_500)
        .images(&["🏠"])
        .facilities(&["Wi-Fi"]),
        rent(
            "6",
            "1-комн. кв. · 42 м² · 4/10 этаж",
            "Пять минут до моря, закрытый двор.",
            "Курортный просп., д. 75",
            "Сочи",
            48_000,
            1,
            1,
            42,
            43.5855,
            39.7231,
        )
        .daily(3_200)
        .featured()
        .images(&["🌴", "🏖️", "🏠"])
        .facilities(&["Wi-Fi", "Кондиционер", "Бассейн"]),
        buy(
            "7",
            "2-комн. кв. · 60 м² · 11/22 этаж",
            "Новостройка с отделкой, сдача в этом году.",
            "ул. Матросская Тишина, д. 12",
            "Москва",
            16.8,
            2,
            1,
            60,
            55.7904,
            37.7033,
        )
        .metro("Сокольники")
        .featured()
        .images(&["🏗️", "🏢"])
        .facilities(&["Подземный паркинг", "Детская площадка"]),
        buy(
            "8",
            "3-комн. кв. · 85 м² · 6/9 этаж",
            "Кирпичный дом, два санузла, гардеробная.",
            "Московский просп., д. 141",
            "Санкт-Петербург",
            14.2,
            3,
            2,
            85,
            59.8677,
            30.3202,
        )
        .metro("Электросила")
        .images(&["🏢", "🛏️"])
        .facilities(&["Лифт", "Кладовая"]),
        buy(
            "9",
            "1-комн. кв. · 45 м² · 8/17 этаж",
            "Вид на набережную, дом бизнес-класса.",
            "ул. Профсоюзная, д. 13",
            "Казань",
            8.9,
            1,
            1,
            45,
            55.7983,
            49.1061,
        )
        .images(&["🏢"])
        .facilities(&["Консьерж", "Паркинг"]),
        buy(
            "10",
            "Апартаменты · 52 м² · 3/8 этаж",
            "Апартаменты у моря с террасой.",
            "ул. Приморская, д. 3",
            "Сочи",
            21.5,
            1,
            1,
            52,
            43.5726,
            39.7355,
        )
        .featured()
        .images(&["🌊", "🏠", "🌴"])
        .facilities(&["Терраса", "Кондиционер"]),
        rent(
            "11",
            "2-комн. кв. · 58 м² · 12/25 этаж",
            "Квартира в новом ЖК, панорамные окна.",
            "ул. Тверская, д. 15",
            "Москва",
            95_000,
            2,
            1,
            58,
            55.7601,
            37.6049,
        )
        .metro("Тверская")
        .daily(4_000)
        .images(&["🏢", "🛋️"])
        .facilities(&["Wi-Fi", "Кондиционер", "Фитнес-зал"]),
        rent(
            "12",
            "Дом · 120 м² · 2 этажа",
            "Загородный дом с участком, гараж на две машины.",
            "пос. Николина Гора, д. 7",
            "Москва",
            150_000,
            4,
            2,
            120,
            55.7430,
            37.1890,
        )
        .images(&["🏡", "🌳"])
        .facilities(&["Гараж", "Сад", "Камин"]),
    ]
}

/// Built-in chat threads with the seed counterparties
pub fn seed_chats() -> Vec<Chat> {
    vec![
        Chat {
            id: "c1".into(),
            user_id: "2".into(),
            messages: vec![
                message("m1", "2", "Здравствуйте! Квартира на Тверской ещё свободна?"),
                message("m2", "1", "Да, можно посмотреть в эти выходные."),
            ],
        },
        Chat {
            id: "c2".into(),
            user_id: "3".into(),
            messages: vec![message(
                "m3",
                "3",
                "Добрый день, интересует посуточная аренда в Сочи.",
            )],
        },
    ]
}

fn user(id: &str, name: &str, email: &str) -> User {
    User {
        id: id.into(),
        name: name.into(),
        email: email.into(),
    }
}

fn message(id: &str, sender_id: &str, text: &str) -> Message {
    Message {
        id: id.into(),
        text: text.into(),
        sender_id: sender_id.into(),
        timestamp: "2023-06-01T10:00:00Z".into(),
    }
}

#[allow(clippy::too_many_arguments)]
fn rent(
    id: &str,
    title: &str,
    description: &str,
    address: &str,
    city: &str,
    price: i64,
    beds: u32,
    baths: u32,
    area_m2: u32,
    lat: f64,
    lng: f64,
) -> Property {
    listing(
        id,
        title,
        description,
        address,
        city,
        PropertyKind::Rent,
        price,
        beds,
        baths,
        area_m2,
        lat,
        lng,
    )
}

#[allow(clippy::too_many_arguments)]
fn buy(
    id: &str,
    title: &str,
    description: &str,
    address: &str,
    city: &str,
    price_millions: f64,
    beds: u32,
    baths: u32,
    area_m2: u32,
    lat: f64,
    lng: f64,
) -> Property {
    let mut property = listing(
        id,
        title,
        description,
        address,
        city,
        PropertyKind::Buy,
        0,
        beds,
        baths,
        area_m2,
        lat,
        lng,
    );
    property.price_buy = Some(price_millions);
    property
}

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    title: &str,
    description: &str,
    address: &str,
    city: &str,
    kind: PropertyKind,
    price: i64,
    beds: u32,
    baths: u32,
    area_m2: u32,
    lat: f64,
    lng: f64,
) -> Property {
    Property {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        address: address.into(),
        city: city.into(),
        price,
        price_daily: None,
        price_buy: None,
        kind,
        beds,
        baths,
        area_m2,
        images: vec!["🏠".into()],
        facilities: vec![],
        // Seed listings belong to the seed counterparties
        owner_id: "2".into(),
        available: true,
        latitude: Some(lat),
        longitude: Some(lng),
        metro: None,
        featured: None,
    }
}

// Small builder helpers used only by the seed tables
trait SeedExt {
    fn metro(self, name: &str) -> Self;
    fn daily(self, price: i64) -> Self;
    fn featured(self) -> Self;
    fn images(self, glyphs: &[&str]) -> Self;
    fn facilities(self, names: &[&str]) -> Self;
}

impl SeedExt for Property {
    fn metro(mut self, name: &str) -> Self {
        self.metro = Some(name.into());
        self
    }

    fn daily(mut self, price: i64) -> Self {
        self.price_daily = Some(price);
        self
    }

    fn featured(mut self) -> Self {
        self.featured = Some(true);
        self
    }

    fn images(mut self, glyphs: &[&str]) -> Self {
        self.images = glyphs.iter().map(|g| g.to_string()).collect();
        self
    }

    fn facilities(mut self, names: &[&str]) -> Self {
        self.facilities = names.iter().map(|n| n.to_string()).collect();
        self
    }
}
