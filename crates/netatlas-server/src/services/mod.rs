//! Сервисный слой: единственный код, читающий и пишущий хранилище.

pub mod device_service;
pub mod link_service;
pub mod topology_service;
