pub mod errors;
pub mod db;
pub mod villa;

#[cfg(test)]
mod tests;
