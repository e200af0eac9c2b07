pub mod memory;
pub mod seaorm;

pub use memory::MemoryClienteRepository;
pub use seaorm::SeaOrmClienteRepository;
