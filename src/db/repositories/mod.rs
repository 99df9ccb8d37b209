mod projects;
mod sessions;
mod tasks;
