mod body;
mod fill;
mod reservation;
mod routes;
mod search;
