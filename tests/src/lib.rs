#[cfg(test)]
mod capture;
#[cfg(test)]
mod utils;
