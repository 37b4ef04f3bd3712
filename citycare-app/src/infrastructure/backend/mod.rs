mod client;

pub use client::CityCareClient;
