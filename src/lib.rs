// modules tree
pub mod client {
    pub mod form_controller;
    pub mod role;
    pub mod transport;
    pub mod validation;
}
pub mod domain {
    pub mod signup;
    pub mod subscriber {
        pub mod api_key;
        pub mod kit_client;
        pub mod kit_types;
        pub mod subscriber_api;
    }
}
pub mod dto {
    pub mod requests {
        pub mod subscribe_request;
    }
    pub mod responses {
        pub mod subscribe_response;
    }
}
pub mod errors {
    pub mod code_error;
    pub mod panic;
}
pub mod handlers {
    pub mod subscribe;
    pub mod server {
        pub mod fallback;
        pub mod healthcheck;
    }
}
pub mod init {
    pub mod config;
    pub mod server_init;
    pub mod state;
    pub mod tracing_init;
}
pub mod routers {
    pub mod main_router;
    pub mod middleware {
        pub mod logging;
    }
}
pub mod docs;

#[cfg(test)]
pub(crate) mod test_util;

pub const APP_NAME_VERSION: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
