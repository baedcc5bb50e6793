pub mod interleaving;
