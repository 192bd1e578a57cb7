pub mod scan; // Camera scan: recognized text → resin code + confidence
