mod city_tests;
mod country_tests;
mod health_tests;
