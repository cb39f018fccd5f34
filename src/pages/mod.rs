//! One component per route.

mod bingo;
mod checkout;
mod checkpoint;
mod dashboard;
mod home;
mod login;
mod lookup;
mod meetings;
mod names;
mod numbers;
mod orders;
mod pos;

pub use bingo::BingoPage;
pub use checkout::CheckoutPage;
pub use checkpoint::CheckpointPage;
pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use lookup::LookupPage;
pub use meetings::MeetingsPage;
pub use names::NameDrawPage;
pub use numbers::NumberDrawPage;
pub use orders::OrdersPage;
pub use pos::PointOfSalePage;
