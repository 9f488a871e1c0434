mod credentials;

pub use credentials::CredentialStore;
