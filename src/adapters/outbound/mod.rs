mod ipapi_provider;
mod ipapicom_provider;
mod ipwhois_provider;

pub use ipapi_provider::IpapiProvider;
pub use ipapicom_provider::IpApiComProvider;
pub use ipwhois_provider::IpwhoisProvider;
