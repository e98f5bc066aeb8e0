pub mod balance;
pub mod frontmatter;
pub mod io;

#[cfg(test)]
pub mod tests;

// Re-export key operations for easier usage
pub use balance::*;
pub use frontmatter::*;
pub use io::*;
