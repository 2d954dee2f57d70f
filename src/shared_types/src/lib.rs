//! Generated TypeScript bindings for `esp-portal-core` live in `generated/`.
