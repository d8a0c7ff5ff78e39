use std::env;

pub fn get_bind_address() -> String {
    env::var("PIPEVIEW_BIND_ADDRESS").unwrap_or("0.0.0.0:4000".to_string())
}

pub fn get_pipelines_dir() -> String {
    env::var("PIPEVIEW_PIPELINES_DIR").unwrap_or("./pipelines/".to_string())
}

pub fn get_repository_name() -> String {
    env::var("PIPEVIEW_REPOSITORY_NAME").unwrap_or("default".to_string())
}
