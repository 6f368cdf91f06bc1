pub mod leercapitulo;

pub use leercapitulo::LeerCapitulo;
