mod cognito;

pub use cognito::CognitoProvider;
