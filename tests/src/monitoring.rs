mod cycle;
mod scheduler;
