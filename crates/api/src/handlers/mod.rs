pub mod rugs;
