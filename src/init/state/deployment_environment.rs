#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeploymentEnvironment {
    Local,
    Dev,
    Staging,
    Prod,
}

impl DeploymentEnvironment {
    /// Parses `CURR_ENV`. Unset means prod, unrecognised values mean local.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(s) => match s.trim().to_ascii_lowercase().as_str() {
                // Local
                "local" | "localhost" => DeploymentEnvironment::Local,
                // Dev
                "dev" | "develop" | "development" => DeploymentEnvironment::Dev,
                // Staging
                "staging" | "stage" | "stg" => DeploymentEnvironment::Staging,
                // Prod
                "prd" | "prod" | "production" => DeploymentEnvironment::Prod,
                _ => DeploymentEnvironment::Local,
            },
            None => DeploymentEnvironment::Prod,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentEnvironment::Local => "local",
            DeploymentEnvironment::Dev => "dev",
            DeploymentEnvironment::Staging => "staging",
            DeploymentEnvironment::Prod => "prod",
        }
    }

    /// Staging and prod ship structured logs.
    pub fn is_deployed(&self) -> bool {
        matches!(
            self,
            DeploymentEnvironment::Staging | DeploymentEnvironment::Prod
        )
    }
}
