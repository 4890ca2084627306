mod provider;

pub use provider::GeoProvider;
