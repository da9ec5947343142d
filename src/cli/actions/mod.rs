use crate::credentials::WorkFactor;

pub mod server;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        allowed_origin: String,
        work_factor: WorkFactor,
    },
}
