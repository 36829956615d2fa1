mod convex_mesh_decomposition;
mod cube_decomposition;
mod decomposition_callback;
mod dumbbell_decomposition;
mod hull_budget;
mod meshes;
mod random_meshes;
