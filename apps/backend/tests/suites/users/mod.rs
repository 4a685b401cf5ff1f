mod follow;
mod registration;
